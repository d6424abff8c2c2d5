//! The scene's directional light and the shadow map it owns.

mod directional;
mod shadow;

pub use directional::{DirectionalLight, DirectionalLightUniform, LightError};
pub use shadow::{
    LightMatrixUniform, ShadowConfig, ShadowMap, ShadowUniform, compute_light_matrix,
};
