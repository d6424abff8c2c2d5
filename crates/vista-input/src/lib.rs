//! Input handling for the viewer: keyboard and mouse state, the object-mode
//! trackball and the FPS fly controller.

pub mod fps;
pub mod keyboard;
pub mod mouse;
pub mod trackball;

pub use fps::{FpsController, MOUSE_SENSITIVITY, MOVE_SPEED};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::{CursorMode, MouseState, scroll_lines};
pub use trackball::{AXIS_EPSILON, ROTATION_DAMPING, Trackball, project_to_sphere, rotation_between};
