//! Unit cube drawn behind everything else with the sky program.

use glam::Mat4;
use vista_render::{CullFace, GeometryBuffer, Program, Renderable, RenderableKind, Vertex};

const CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

// Two triangles per face, wound to face the inside of the cube.
const INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3, // -Z
    4, 6, 5, 4, 7, 6, // +Z
    0, 3, 7, 0, 7, 4, // -X
    1, 5, 6, 1, 6, 2, // +X
    0, 4, 5, 0, 5, 1, // -Y
    3, 2, 6, 3, 6, 7, // +Y
];

pub struct Skybox {
    mesh: [GeometryBuffer; 1],
}

impl Skybox {
    pub fn new() -> Self {
        let vertices = CORNERS
            .iter()
            .map(|&p| {
                let inward = [-p[0], -p[1], -p[2]];
                Vertex::new(p, inward, [0.0, 0.0])
            })
            .collect();
        Self {
            mesh: [GeometryBuffer::new(vertices, INDICES.to_vec())],
        }
    }

    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        self.mesh[0].upload(device, queue, "sky-mesh");
    }

    pub fn release(&mut self) {
        self.mesh[0].release();
    }
}

impl Default for Skybox {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for Skybox {
    fn kind(&self) -> RenderableKind {
        RenderableKind::Sky
    }

    fn shadow_cull(&self) -> Option<CullFace> {
        None
    }

    fn program(&self) -> Program {
        Program::Sky
    }

    fn geometry(&self) -> &[GeometryBuffer] {
        &self.mesh
    }

    fn object_bind_group(&self) -> Option<&wgpu::BindGroup> {
        None
    }

    // The sky shader only reads the camera rotation.
    fn send_matrix_to_shader(&self, _queue: &wgpu::Queue, _view: Mat4) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_cube_shape() {
        let sky = Skybox::new();
        let mesh = &sky.geometry()[0];
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.index_count(), 36);
        assert!(mesh.indices().iter().all(|&i| i < 8));
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Vec3::splat(-1.0));
        assert_eq!(bounds.max, Vec3::splat(1.0));
    }

    #[test]
    fn test_every_triangle_faces_inward() {
        let sky = Skybox::new();
        let mesh = &sky.geometry()[0];
        let p = |i: u32| Vec3::from(mesh.vertices()[i as usize].position);
        for tri in mesh.indices().chunks(3) {
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) < 0.0, "triangle {tri:?} faces outward");
        }
    }

    #[test]
    fn test_sky_is_not_a_shadow_caster() {
        let sky = Skybox::new();
        assert_eq!(sky.shadow_cull(), None);
        assert_eq!(sky.program(), Program::Sky);
        assert!(sky.object_bind_group().is_none());
    }
}
