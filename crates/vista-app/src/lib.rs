//! The Vista viewer application: startup, input dispatch and the window
//! event loop.

pub mod controls;
pub mod error;
pub mod frame_clock;
pub mod startup;
pub mod window;

pub use controls::{ControlResponse, Controls, InteractionMode};
pub use error::AppError;
pub use frame_clock::FrameClock;
pub use startup::load_scene;
pub use window::{AppState, run};
