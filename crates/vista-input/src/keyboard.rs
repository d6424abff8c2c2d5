//! Keyboard state for the viewer.
//!
//! Discrete commands (reset, camera mode, scale) react to presses as they
//! arrive; FPS movement polls which keys are held every frame. Both go
//! through [`KeyboardState`], keyed by physical key so WASD sits in the same
//! place on every layout.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// The parts of a key event the viewer cares about.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// Held keys, this frame's presses and the current modifier set.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    modifiers: ModifiersState,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event. Returns the key code when the event is a fresh
    /// press, which is what command handlers dispatch on.
    pub fn process(&mut self, event: RawKeyEvent) -> Option<KeyCode> {
        match event.state {
            ElementState::Pressed => {
                self.held.insert(event.key);
                if event.repeat {
                    return None;
                }
                self.just_pressed.insert(event.key);
                match event.key {
                    PhysicalKey::Code(code) => Some(code),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            ElementState::Released => {
                self.held.remove(&event.key);
                None
            }
        }
    }

    pub fn process_event(&mut self, event: &KeyEvent) -> Option<KeyCode> {
        self.process(RawKeyEvent::from(event))
    }

    /// Track Shift/Ctrl/Alt from `WindowEvent::ModifiersChanged`.
    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    #[must_use]
    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.shift_key()
    }

    #[must_use]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&PhysicalKey::Code(code))
    }

    /// True if any of `codes` is held.
    #[must_use]
    pub fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&c| self.is_held(c))
    }

    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.just_pressed.contains(&PhysicalKey::Code(code))
    }

    /// Forget this frame's presses. Call once per frame after input is handled.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Drop every held key, e.g. when the window loses focus and release
    /// events would go elsewhere.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.modifiers = ModifiersState::empty();
    }
}
