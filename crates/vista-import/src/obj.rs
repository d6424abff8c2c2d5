//! Wavefront OBJ reader built on `tobj`.
//!
//! OBJ has no node hierarchy: every object in the file becomes one mesh and
//! a single root node references all of them.

use std::path::Path;

use crate::scene::{RawMesh, SceneHandle, SceneNode};

pub(crate) fn read_obj(path: &Path) -> Result<SceneHandle, String> {
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ..Default::default()
    };

    let (models, materials) = tobj::load_obj(path, &options).map_err(|e| e.to_string())?;
    if let Err(e) = materials {
        // Materials are not used; a missing .mtl only matters for textures.
        log::debug!("Ignoring material library for {}: {}", path.display(), e);
    }

    let mut root = SceneNode::new(
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("obj-root"),
    );
    let mut meshes = Vec::with_capacity(models.len());

    for model in models {
        root.mesh_indices.push(meshes.len());
        meshes.push(convert_mesh(model));
    }

    let incomplete = meshes.is_empty();
    Ok(SceneHandle {
        root: Some(root),
        meshes,
        incomplete,
    })
}

fn convert_mesh(model: tobj::Model) -> RawMesh {
    let mesh = model.mesh;

    let positions = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect::<Vec<_>>();
    let normals = mesh
        .normals
        .chunks_exact(3)
        .map(|n| [n[0], n[1], n[2]])
        .collect::<Vec<_>>();
    let tex_coords0 = (!mesh.texcoords.is_empty()).then(|| {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| [t[0], t[1]])
            .collect::<Vec<_>>()
    });

    // `face_arities` is empty when every face is a triangle.
    let faces = if mesh.face_arities.is_empty() {
        mesh.indices.chunks_exact(3).map(<[u32]>::to_vec).collect()
    } else {
        let mut faces = Vec::with_capacity(mesh.face_arities.len());
        let mut start = 0usize;
        for &arity in &mesh.face_arities {
            let end = start + arity as usize;
            if end > mesh.indices.len() {
                log::warn!("Mesh '{}': face list truncated", model.name);
                break;
            }
            faces.push(mesh.indices[start..end].to_vec());
            start = end;
        }
        faces
    };

    RawMesh {
        name: model.name,
        positions,
        normals: if normals.len() == mesh.positions.len() / 3 {
            normals
        } else {
            Vec::new()
        },
        tex_coords0,
        faces,
    }
}
