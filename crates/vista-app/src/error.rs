//! Fatal viewer errors.

use vista_import::ImportError;
use vista_render::{RenderContextError, SurfaceError};
use vista_scene::SceneError;

/// Anything that stops the viewer. `main` logs it and exits with status 1.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no model given: pass a path on the command line or set scene.model_path")]
    NoModel,

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] RenderContextError),

    #[error("surface failure: {0}")]
    Surface(#[from] SurfaceError),
}
