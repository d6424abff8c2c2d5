//! Flat ground quad that receives the model's shadow.

use glam::{Mat4, Vec3};
use vista_render::{
    CullFace, GeometryBuffer, ObjectBinding, ObjectUniform, Program, Renderable, RenderableKind,
    Vertex,
};

pub struct Ground {
    mesh: [GeometryBuffer; 1],
    color: Vec3,
    binding: Option<ObjectBinding>,
}

impl Ground {
    /// Square of side `2 * half_size` at height `height`, facing +Y.
    pub fn new(height: f32, half_size: f32, color: Vec3) -> Self {
        let s = half_size.abs();
        let up = [0.0, 1.0, 0.0];
        let vertices = vec![
            Vertex::new([-s, height, -s], up, [0.0, 0.0]),
            Vertex::new([-s, height, s], up, [0.0, 1.0]),
            Vertex::new([s, height, s], up, [1.0, 1.0]),
            Vertex::new([s, height, -s], up, [1.0, 0.0]),
        ];
        Self {
            mesh: [GeometryBuffer::new(vertices, vec![0, 1, 2, 0, 2, 3])],
            color,
            binding: None,
        }
    }

    pub fn height(&self) -> f32 {
        self.mesh[0].vertices()[0].position[1]
    }

    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        object_layout: &wgpu::BindGroupLayout,
    ) {
        self.mesh[0].upload(device, queue, "ground-mesh");
        if self.binding.is_none() {
            let uniform = ObjectUniform::new(Mat4::IDENTITY, Mat4::IDENTITY, self.color);
            self.binding = Some(ObjectBinding::new(device, object_layout, "ground-object", &uniform));
        }
    }

    pub fn release(&mut self) {
        self.mesh[0].release();
        self.binding = None;
    }
}

impl Renderable for Ground {
    fn kind(&self) -> RenderableKind {
        RenderableKind::Ground
    }

    fn shadow_cull(&self) -> Option<CullFace> {
        Some(CullFace::Back)
    }

    fn program(&self) -> Program {
        Program::Lit
    }

    fn geometry(&self) -> &[GeometryBuffer] {
        &self.mesh
    }

    fn object_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.binding.as_ref().map(|b| &b.bind_group)
    }

    fn send_matrix_to_shader(&self, queue: &wgpu::Queue, view: Mat4) {
        if let Some(binding) = &self.binding {
            binding.write(queue, &ObjectUniform::new(Mat4::IDENTITY, view, self.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_faces_up() {
        let ground = Ground::new(-1.5, 10.0, Vec3::ONE);
        let mesh = &ground.geometry()[0];
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(ground.height(), -1.5);

        let p = |i: u32| Vec3::from(mesh.vertices()[i as usize].position);
        for tri in mesh.indices().chunks(3) {
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.normalize().dot(Vec3::Y) > 0.999);
        }
    }

    #[test]
    fn test_bounds_cover_half_size() {
        let ground = Ground::new(0.0, 25.0, Vec3::ONE);
        let bounds = ground.geometry()[0].bounds();
        assert_eq!(bounds.min, Vec3::new(-25.0, 0.0, -25.0));
        assert_eq!(bounds.max, Vec3::new(25.0, 0.0, 25.0));
    }

    #[test]
    fn test_casts_with_back_face_culling() {
        let ground = Ground::new(0.0, 1.0, Vec3::ONE);
        assert_eq!(ground.shadow_cull(), Some(CullFace::Back));
        assert_eq!(ground.kind(), RenderableKind::Ground);
    }
}
