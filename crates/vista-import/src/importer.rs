//! Flattening of a [`SceneHandle`] into CPU-side [`GeometryBuffer`]s.

use std::path::{Path, PathBuf};

use glam::{Mat3, Mat4, Vec3};
use vista_math::Aabb;
use vista_render::{GeometryBuffer, Vertex};

use crate::scene::{ImportFlags, RawMesh, SceneFormat, SceneHandle, SceneNode, read_scene};

/// Errors produced while importing a model file.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to load scene {path}: {message}")]
    SceneInvalid { path: PathBuf, message: String },
    #[error("unsupported model format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// A texture a material refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    pub kind: String,
    pub path: PathBuf,
}

/// One flattened mesh, ready to upload.
#[derive(Debug)]
pub struct ImportedMesh {
    pub geometry: GeometryBuffer,
    pub textures: Vec<TextureRef>,
}

/// The result of a successful import. Holds no GPU resources.
#[derive(Debug)]
pub struct ImportedModel {
    pub meshes: Vec<ImportedMesh>,
    /// Directory containing the source file.
    pub directory: PathBuf,
}

impl ImportedModel {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.geometry.vertices().len()).sum()
    }

    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(|m| m.geometry.indices().len()).sum()
    }

    /// Union of all mesh bounds.
    pub fn bounds(&self) -> Aabb {
        self.meshes
            .iter()
            .fold(Aabb::EMPTY, |acc, m| acc.union(&m.geometry.bounds()))
    }

    /// Split off the geometry, dropping texture references.
    pub fn into_geometry(self) -> Vec<GeometryBuffer> {
        self.meshes.into_iter().map(|m| m.geometry).collect()
    }
}

/// Reads model files into flat mesh lists.
#[derive(Debug, Clone, Default)]
pub struct ModelImporter {
    flags: ImportFlags,
}

impl ModelImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(flags: ImportFlags) -> Self {
        Self { flags }
    }

    /// Bake node transforms into the vertices instead of reading each
    /// mesh in its own local space.
    pub fn apply_node_transforms(mut self, apply: bool) -> Self {
        self.flags.apply_node_transforms = apply;
        self
    }

    pub fn flags(&self) -> ImportFlags {
        self.flags
    }

    pub fn import(&self, path: impl AsRef<Path>) -> Result<ImportedModel, ImportError> {
        let path = path.as_ref();
        log::info!("Importing model from {}", path.display());

        if SceneFormat::from_path(path).is_none() {
            return Err(ImportError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            });
        }

        let invalid = |message: String| ImportError::SceneInvalid {
            path: path.to_path_buf(),
            message,
        };

        let scene = read_scene(path, self.flags).map_err(invalid)?;
        if scene.incomplete {
            return Err(invalid("scene is incomplete".to_owned()));
        }
        let Some(root) = scene.root.as_ref() else {
            return Err(invalid("scene has no root node".to_owned()));
        };

        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let meshes = self.flatten(&scene, root);

        let model = ImportedModel { meshes, directory };
        log::info!(
            "Imported {} meshes ({} vertices, {} indices) from {}",
            model.meshes.len(),
            model.vertex_count(),
            model.index_count(),
            path.display()
        );
        Ok(model)
    }

    /// Depth-first walk keeping the parent-to-root transform alongside
    /// each pending node. Children are visited in file order.
    fn flatten(&self, scene: &SceneHandle, root: &SceneNode) -> Vec<ImportedMesh> {
        let mut out = Vec::new();
        let mut stack: Vec<(&SceneNode, Mat4)> = vec![(root, Mat4::IDENTITY)];

        while let Some((node, parent)) = stack.pop() {
            let world = parent * node.local_transform;
            for &index in &node.mesh_indices {
                let Some(raw) = scene.meshes.get(index) else {
                    log::warn!("Node '{}' references missing mesh {}", node.name, index);
                    continue;
                };
                let transform = self.flags.apply_node_transforms.then_some(world);
                let geometry = convert_mesh(raw, transform);
                let textures = load_material_textures(raw, &node.name);
                out.push(ImportedMesh { geometry, textures });
            }
            stack.extend(node.children.iter().rev().map(|c| (c, world)));
        }

        out
    }
}

/// Material and texture extraction. Textures are not loaded, so this
/// always yields an empty list.
pub fn load_material_textures(_mesh: &RawMesh, _type_name: &str) -> Vec<TextureRef> {
    Vec::new()
}

fn convert_mesh(raw: &RawMesh, transform: Option<Mat4>) -> GeometryBuffer {
    let vertex_count = raw.positions.len();

    let mut indices = Vec::with_capacity(raw.faces.len() * 3);
    let mut skipped = 0usize;
    for face in &raw.faces {
        if face.len() != 3 || face.iter().any(|&i| i as usize >= vertex_count) {
            skipped += 1;
            continue;
        }
        indices.extend_from_slice(face);
    }
    if skipped > 0 {
        log::warn!("Mesh '{}': skipped {} invalid faces", raw.name, skipped);
    }

    let mut positions: Vec<Vec3> = raw.positions.iter().map(|&p| Vec3::from(p)).collect();
    let mut normals: Vec<Vec3> = if raw.normals.len() == vertex_count {
        raw.normals.iter().map(|&n| Vec3::from(n)).collect()
    } else {
        smooth_normals(&positions, &indices)
    };

    if let Some(m) = transform {
        let normal_mat = normal_transform(m);
        for p in &mut positions {
            *p = m.transform_point3(*p);
        }
        for n in &mut normals {
            *n = normal_mat * *n;
        }
    }

    let vertices = (0..vertex_count)
        .map(|i| {
            let uv = raw
                .tex_coords0
                .as_ref()
                .and_then(|uvs| uvs.get(i))
                .copied()
                .unwrap_or([0.0, 0.0]);
            Vertex::new(
                positions[i].to_array(),
                normals[i].normalize_or_zero().to_array(),
                uv,
            )
        })
        .collect();

    GeometryBuffer::new(vertices, indices)
}

/// Inverse-transpose of the upper 3x3; identity when singular.
fn normal_transform(m: Mat4) -> Mat3 {
    let m3 = Mat3::from_mat4(m);
    if m3.determinant().abs() <= f32::EPSILON {
        Mat3::IDENTITY
    } else {
        m3.inverse().transpose()
    }
}

/// Area-weighted vertex normals from triangle indices.
pub(crate) fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        // Unnormalized cross product is proportional to triangle area.
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals.iter().map(|n| n.normalize_or_zero()).collect()
}
