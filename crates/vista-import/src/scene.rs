//! Format-neutral scene description produced by the file readers.
//!
//! A reader fills a [`SceneHandle`] with raw meshes and an explicit node
//! tree. Post-processing shared by every format (triangulation, UV
//! orientation) runs in [`read_scene`] before the handle is returned.

use std::path::Path;

use glam::Mat4;

use crate::{gltf_reader, obj};

/// Options passed to the scene reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportFlags {
    /// Fan-triangulate polygons with more than three corners.
    pub triangulate: bool,
    /// Convert texture coordinates from a bottom-left to a top-left origin.
    pub flip_uvs: bool,
    /// Bake the accumulated node transforms into vertex data.
    pub apply_node_transforms: bool,
}

impl Default for ImportFlags {
    fn default() -> Self {
        Self {
            triangulate: true,
            flip_uvs: true,
            apply_node_transforms: false,
        }
    }
}

/// File formats the reader understands, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Obj,
    Gltf,
}

impl SceneFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Some(SceneFormat::Obj),
            "gltf" | "glb" => Some(SceneFormat::Gltf),
            _ => None,
        }
    }
}

/// One mesh as read from the file, before conversion to GPU vertices.
///
/// Attribute arrays are indexed by the entries of `faces`. Texture
/// coordinates use a bottom-left origin until [`read_scene`] flips them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// Empty when the file carries no normals.
    pub normals: Vec<[f32; 3]>,
    pub tex_coords0: Option<Vec<[f32; 2]>>,
    pub faces: Vec<Vec<u32>>,
}

impl RawMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// True when every face has exactly three corners.
    pub fn is_triangulated(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }
}

/// A node of the scene tree. `mesh_indices` index into [`SceneHandle::meshes`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub local_transform: Mat4,
    pub mesh_indices: Vec<usize>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_transform: Mat4::IDENTITY,
            mesh_indices: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }
}

/// Everything a reader produced for one file.
#[derive(Debug, Clone, Default)]
pub struct SceneHandle {
    pub root: Option<SceneNode>,
    pub meshes: Vec<RawMesh>,
    /// Set when the file parsed but holds no usable geometry.
    pub incomplete: bool,
}

/// Read a scene file and apply the requested post-processing.
///
/// Errors are the reader's own diagnostic text.
pub fn read_scene(path: &Path, flags: ImportFlags) -> Result<SceneHandle, String> {
    let mut scene = match SceneFormat::from_path(path) {
        Some(SceneFormat::Obj) => obj::read_obj(path)?,
        Some(SceneFormat::Gltf) => gltf_reader::read_gltf(path)?,
        None => return Err(format!("unrecognized file extension: {}", path.display())),
    };

    for mesh in &mut scene.meshes {
        clean_faces(mesh, flags.triangulate);
        if flags.flip_uvs
            && let Some(uvs) = mesh.tex_coords0.as_mut()
        {
            for uv in uvs.iter_mut() {
                uv[1] = 1.0 - uv[1];
            }
        }
    }

    if scene.meshes.iter().all(|m| m.faces.is_empty()) {
        scene.incomplete = true;
    }

    Ok(scene)
}

/// Drop point and line primitives and, when asked, split polygons into
/// triangle fans.
fn clean_faces(mesh: &mut RawMesh, triangulate: bool) {
    let mut degenerate = 0usize;
    let mut faces = Vec::with_capacity(mesh.faces.len());

    for face in mesh.faces.drain(..) {
        match face.len() {
            0..=2 => degenerate += 1,
            3 => faces.push(face),
            _ if triangulate => faces.extend(fan_triangulate(&face)),
            _ => faces.push(face),
        }
    }

    if degenerate > 0 {
        log::warn!(
            "Mesh '{}': dropped {} point/line primitives",
            mesh.name,
            degenerate
        );
    }
    mesh.faces = faces;
}

/// Split a convex polygon `[a, b, c, d, ...]` into `[a, b, c], [a, c, d], ...`.
pub fn fan_triangulate(face: &[u32]) -> Vec<Vec<u32>> {
    if face.len() < 3 {
        return Vec::new();
    }
    (1..face.len() - 1)
        .map(|i| vec![face[0], face[i], face[i + 1]])
        .collect()
}
