//! CPU-side mesh data paired with the GPU buffers built from it.

use vista_math::Aabb;

use crate::buffer::{BufferAllocator, MeshBuffer, Vertex};

/// One mesh: vertices, a triangle-list index buffer and, once uploaded, the
/// matching GPU buffers.
///
/// Construction never touches the GPU. Buffers appear on the first
/// [`upload`](Self::upload) and are refreshed whenever the vertices were
/// mutated through [`vertices_mut`](Self::vertices_mut).
pub struct GeometryBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    gpu: Option<MeshBuffer>,
    dirty: bool,
}

impl GeometryBuffer {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            gpu: None,
            dirty: true,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable vertex access. Marks the mesh for re-upload.
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        self.dirty = true;
        &mut self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// True when the GPU copy is missing or stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// True once GPU buffers exist.
    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// Bounds of the vertex positions; [`Aabb::EMPTY`] without vertices.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| glam::Vec3::from(v.position)))
    }

    /// Create or refresh the GPU buffers.
    ///
    /// Buffers of the right size are rewritten in place; a size change
    /// reallocates them. Empty meshes get no buffers.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, label: &str) {
        if !self.dirty && self.gpu.is_some() {
            return;
        }

        if self.vertices.is_empty() || self.indices.is_empty() {
            self.release();
            self.dirty = false;
            return;
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&self.indices);
        let wanted = (vertex_bytes.len() as u64, index_bytes.len() as u64);

        match &self.gpu {
            Some(gpu) if gpu.sizes() == wanted => {
                queue.write_buffer(&gpu.vertex_buffer, 0, vertex_bytes);
                queue.write_buffer(&gpu.index_buffer, 0, index_bytes);
                log::trace!("Re-uploaded mesh '{label}'");
            }
            _ => {
                self.release();
                let allocator = BufferAllocator::new(device);
                self.gpu = Some(allocator.create_mesh(label, &self.vertices, &self.indices));
                log::trace!(
                    "Uploaded mesh '{label}': {} vertices, {} indices",
                    self.vertices.len(),
                    self.indices.len()
                );
            }
        }
        self.dirty = false;
    }

    /// Issue one indexed draw of the whole mesh. No-op before upload.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if let Some(gpu) = &self.gpu {
            gpu.bind(pass);
            gpu.draw(pass);
        }
    }

    /// Destroy the GPU buffers. Safe to call repeatedly; only the first call
    /// after an upload frees anything.
    pub fn release(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            gpu.destroy();
            self.dirty = true;
        }
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for GeometryBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryBuffer")
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .field("uploaded", &self.gpu.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::tests::create_test_device;
    use glam::Vec3;

    fn triangle_at(offset: [f32; 3]) -> GeometryBuffer {
        let v = |x: f32, y: f32| {
            Vertex::new(
                [offset[0] + x, offset[1] + y, offset[2]],
                [0.0, 0.0, 1.0],
                [0.0, 0.0],
            )
        };
        GeometryBuffer::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)], vec![0, 1, 2])
    }

    #[test]
    fn test_new_is_cpu_only_and_dirty() {
        let mesh = triangle_at([0.0; 3]);
        assert!(!mesh.is_uploaded());
        assert!(mesh.is_dirty());
        assert_eq!(mesh.index_count(), 3);
    }

    #[test]
    fn test_bounds() {
        let mesh = triangle_at([10.0, 0.0, -2.0]);
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Vec3::new(10.0, 0.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, -2.0));
    }

    #[test]
    fn test_empty_bounds() {
        let mesh = GeometryBuffer::new(Vec::new(), Vec::new());
        assert!(mesh.bounds().is_empty());
    }

    #[test]
    fn test_release_without_upload_is_noop() {
        let mut mesh = triangle_at([0.0; 3]);
        mesh.release();
        mesh.release();
        assert!(!mesh.is_uploaded());
    }

    #[test]
    fn test_upload_then_mutation_marks_dirty() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let mut mesh = triangle_at([0.0; 3]);
        mesh.upload(&device, &queue, "tri");
        assert!(mesh.is_uploaded());
        assert!(!mesh.is_dirty());

        mesh.vertices_mut()[0].position[0] = 5.0;
        assert!(mesh.is_dirty());
        mesh.upload(&device, &queue, "tri");
        assert!(!mesh.is_dirty());
        assert!(mesh.is_uploaded());
    }

    #[test]
    fn test_release_frees_once() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let mut mesh = triangle_at([0.0; 3]);
        mesh.upload(&device, &queue, "tri");
        mesh.release();
        assert!(!mesh.is_uploaded());
        assert!(mesh.is_dirty());
        mesh.release();
        assert!(!mesh.is_uploaded());
    }

    #[test]
    fn test_empty_mesh_gets_no_buffers() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let mut mesh = GeometryBuffer::new(Vec::new(), Vec::new());
        mesh.upload(&device, &queue, "empty");
        assert!(!mesh.is_uploaded());
        assert!(!mesh.is_dirty());
    }
}
