//! Re-centering of imported geometry around the model-space origin.

use glam::Vec3;
use vista_math::{Aabb, InputRangeError};
use vista_render::GeometryBuffer;

/// Union of the bounds of every mesh.
pub fn combined_bounds(meshes: &[GeometryBuffer]) -> Aabb {
    meshes
        .iter()
        .fold(Aabb::EMPTY, |acc, mesh| acc.union(&mesh.bounds()))
}

/// Translate every vertex so the center of the combined bounding box sits
/// at the origin. Returns the translation that was subtracted.
///
/// Degenerate input leaves the meshes untouched.
pub fn center_to_origin(meshes: &mut [GeometryBuffer]) -> Result<Vec3, InputRangeError> {
    let center = combined_bounds(meshes).checked_center()?;

    for mesh in meshes.iter_mut() {
        for vertex in mesh.vertices_mut() {
            vertex.position = (Vec3::from(vertex.position) - center).to_array();
        }
    }

    log::info!("Centered model: translated by {:?}", -center);
    Ok(center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_render::Vertex;

    fn mesh(points: &[[f32; 3]]) -> GeometryBuffer {
        let vertices = points
            .iter()
            .map(|&p| Vertex::new(p, [0.0, 0.0, 1.0], [0.0, 0.0]))
            .collect();
        GeometryBuffer::new(vertices, vec![0, 1, 2])
    }

    #[test]
    fn test_center_spans_all_meshes() {
        let mut meshes = vec![
            mesh(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]]),
            mesh(&[[10.0, 4.0, 6.0], [8.0, 4.0, 6.0], [8.0, 2.0, 6.0]]),
        ];
        let t = center_to_origin(&mut meshes).unwrap();
        assert_eq!(t, Vec3::new(5.0, 2.0, 3.0));

        let bounds = combined_bounds(&meshes);
        assert!(bounds.center().length() < 1e-6);
        assert_eq!(bounds.min, Vec3::new(-5.0, -2.0, -3.0));
        assert_eq!(bounds.max, Vec3::new(5.0, 2.0, 3.0));
        assert!(meshes.iter().all(GeometryBuffer::is_dirty));
    }

    #[test]
    fn test_already_centered_is_unchanged() {
        let mut meshes = vec![mesh(&[[-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [1.0, 1.0, 0.0]])];
        let t = center_to_origin(&mut meshes).unwrap();
        assert_eq!(t, Vec3::ZERO);
        assert_eq!(meshes[0].vertices()[0].position, [-1.0, -1.0, 0.0]);
    }

    #[test]
    fn test_no_meshes_is_empty_geometry() {
        let mut meshes: Vec<GeometryBuffer> = Vec::new();
        assert_eq!(center_to_origin(&mut meshes), Err(InputRangeError::EmptyGeometry));
    }

    #[test]
    fn test_meshes_without_vertices_are_empty_geometry() {
        let mut meshes = vec![GeometryBuffer::new(Vec::new(), Vec::new())];
        assert_eq!(center_to_origin(&mut meshes), Err(InputRangeError::EmptyGeometry));
    }

    #[test]
    fn test_infinite_vertex_is_rejected_without_mutation() {
        let mut meshes = vec![mesh(&[[0.0, 0.0, 0.0], [f32::INFINITY, 0.0, 0.0], [1.0, 1.0, 1.0]])];
        let err = center_to_origin(&mut meshes).unwrap_err();
        assert!(matches!(err, InputRangeError::NonFiniteBounds { .. }));
        assert_eq!(meshes[0].vertices()[2].position, [1.0, 1.0, 1.0]);
    }
}
