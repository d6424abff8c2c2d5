//! Bounding volumes and small matrix helpers shared by the import, scene and render crates.

mod aabb;
mod normal;

pub use aabb::{Aabb, InputRangeError};
pub use normal::normal_matrix;
