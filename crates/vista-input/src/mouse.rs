//! Pointer state: cursor position, button state, wheel and raw look motion.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// How the OS cursor behaves over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Visible and free.
    #[default]
    Normal,
    /// Invisible but still reporting positions, used while dragging the
    /// trackball.
    Hidden,
    /// Invisible and grabbed; look input comes from raw device motion.
    Captured,
}

impl CursorMode {
    /// Apply grab and visibility to `window`.
    pub fn apply(self, window: &winit::window::Window) {
        use winit::window::CursorGrabMode;
        match self {
            CursorMode::Normal => {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
            }
            CursorMode::Hidden => {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(false);
            }
            CursorMode::Captured => {
                // Locked is not supported everywhere; Confined still keeps
                // the pointer inside the window.
                if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
                    && let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined)
                {
                    log::warn!("Cursor grab unavailable: {e}");
                }
                window.set_cursor_visible(false);
            }
        }
    }
}

/// Wheel movement in lines, positive away from the user.
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => y,
        // ~40 pixels per line on touchpads
        MouseScrollDelta::PixelDelta(pos) => (pos.y / 40.0) as f32,
    }
}

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    left: bool,
    right: bool,
    look_delta: Vec2,
    mode: CursorMode,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Vec2 {
        self.position = Vec2::new(x as f32, y as f32);
        self.position
    }

    /// Raw motion only counts toward look input while captured.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.mode == CursorMode::Captured {
            self.look_delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Right => self.right = pressed,
            _ => {}
        }
    }

    /// Look motion gathered since the last call, cleared on read.
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Record the cursor mode. The caller applies it to the window.
    pub fn set_mode(&mut self, mode: CursorMode) {
        if mode != CursorMode::Captured {
            self.look_delta = Vec2::ZERO;
        }
        self.mode = mode;
    }

    #[must_use]
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn left_pressed(&self) -> bool {
        self.left
    }

    #[must_use]
    pub fn right_pressed(&self) -> bool {
        self.right
    }
}
