//! glTF 2.0 / GLB reader built on the `gltf` crate.
//!
//! Every primitive becomes one [`RawMesh`]; a glTF mesh index maps to the
//! range of raw meshes its primitives produced. The selected scene's nodes
//! hang under a synthetic root so the tree always has a single entry point.

use std::ops::Range;
use std::path::Path;

use glam::Mat4;
use gltf::mesh::Mode;

use crate::scene::{RawMesh, SceneHandle, SceneNode, fan_triangulate};

pub(crate) fn read_gltf(path: &Path) -> Result<SceneHandle, String> {
    let gltf::Gltf { document, blob } = gltf::Gltf::open(path).map_err(|e| e.to_string())?;
    let buffers =
        gltf::import_buffers(&document, path.parent(), blob).map_err(|e| e.to_string())?;

    let mut meshes = Vec::new();
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for mesh in document.meshes() {
        let start = meshes.len();
        for primitive in mesh.primitives() {
            if let Some(raw) = read_primitive(&mesh, &primitive, &buffers) {
                meshes.push(raw);
            }
        }
        ranges.push(start..meshes.len());
    }

    let scene = document.default_scene().or_else(|| document.scenes().next());
    let root = scene.map(|scene| {
        let mut root = SceneNode::new(scene.name().unwrap_or("gltf-root"));
        root.children = scene.nodes().map(|n| convert_node(&n, &ranges)).collect();
        root
    });

    let incomplete = meshes.is_empty();
    Ok(SceneHandle {
        root,
        meshes,
        incomplete,
    })
}

fn convert_node(node: &gltf::Node<'_>, ranges: &[Range<usize>]) -> SceneNode {
    let mut out = SceneNode::new(node.name().unwrap_or_default());
    out.local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh()
        && let Some(range) = ranges.get(mesh.index())
    {
        out.mesh_indices.extend(range.clone());
    }
    out.children = node.children().map(|c| convert_node(&c, ranges)).collect();
    out
}

fn read_primitive(
    mesh: &gltf::Mesh<'_>,
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Option<RawMesh> {
    let name = mesh
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("mesh{}", mesh.index()));

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

    let Some(positions) = reader.read_positions() else {
        log::warn!("Mesh '{}': primitive {} has no positions", name, primitive.index());
        return None;
    };
    let positions: Vec<[f32; 3]> = positions.collect();
    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|it| it.collect())
        .unwrap_or_default();
    // glTF puts the UV origin top-left; store bottom-left like every other
    // reader so the shared flip applies uniformly.
    let tex_coords0 = reader.read_tex_coords(0).map(|uvs| {
        uvs.into_f32()
            .map(|[u, v]| [u, 1.0 - v])
            .collect::<Vec<_>>()
    });

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let faces = match primitive.mode() {
        Mode::Triangles => indices.chunks_exact(3).map(<[u32]>::to_vec).collect(),
        Mode::TriangleStrip => strip_faces(&indices),
        Mode::TriangleFan => fan_triangulate(&indices),
        mode => {
            log::warn!("Mesh '{}': skipping {:?} primitive", name, mode);
            return None;
        }
    };

    Some(RawMesh {
        name,
        normals: if normals.len() == positions.len() {
            normals
        } else {
            Vec::new()
        },
        positions,
        tex_coords0,
        faces,
    })
}

/// Triangles of a strip, alternating winding so all keep the same facing.
fn strip_faces(indices: &[u32]) -> Vec<Vec<u32>> {
    indices
        .windows(3)
        .enumerate()
        .map(|(i, w)| {
            if i % 2 == 0 {
                vec![w[0], w[1], w[2]]
            } else {
                vec![w[1], w[0], w[2]]
            }
        })
        .collect()
}
