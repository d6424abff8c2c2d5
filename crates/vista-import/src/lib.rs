//! Model import: OBJ and glTF files read into an explicit node tree, then
//! flattened into CPU-side meshes. Nothing here touches the GPU.

mod gltf_reader;
mod importer;
mod obj;
mod scene;

pub use importer::{
    ImportError, ImportedMesh, ImportedModel, ModelImporter, TextureRef, load_material_textures,
};
pub use scene::{
    ImportFlags, RawMesh, SceneFormat, SceneHandle, SceneNode, fan_triangulate, read_scene,
};
