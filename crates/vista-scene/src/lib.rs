//! The viewer's scene: the imported model, ground and sky, the light and
//! camera that frame them, and the renderer that draws them with shadows.

mod bounds;
mod context;
mod ground;
mod model;
mod renderer;
mod skybox;

pub use bounds::{center_to_origin, combined_bounds};
pub use context::{SceneContext, SceneError};
pub use ground::Ground;
pub use model::Model;
pub use renderer::SceneRenderer;
pub use skybox::Skybox;
