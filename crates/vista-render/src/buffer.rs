//! Vertex and index buffer management for GPU rendering.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// A complete mesh buffer containing vertex and index data ready for GPU rendering.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffer {
    /// Index format shared by every mesh in the viewer.
    pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

    /// Bind vertex and index buffers to a render pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), Self::INDEX_FORMAT);
    }

    /// Draw the entire mesh using indexed rendering.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Byte sizes of the vertex and index buffers.
    pub fn sizes(&self) -> (u64, u64) {
        (self.vertex_buffer.size(), self.index_buffer.size())
    }

    /// Free both buffers now instead of waiting for the last handle to drop.
    pub fn destroy(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

/// GPU buffer allocator for creating vertex and index buffers.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    /// Create a new buffer allocator with the given device.
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Create a complete mesh buffer from vertex and index data.
    pub fn create_mesh(&self, label: &str, vertices: &[Vertex], indices: &[u32]) -> MeshBuffer {
        MeshBuffer {
            vertex_buffer: self.create_vertex_buffer(
                &format!("{label}-vertices"),
                bytemuck::cast_slice(vertices),
            ),
            index_buffer: self.create_index_buffer(&format!("{label}-indices"), indices),
            index_count: indices.len() as u32,
        }
    }

    /// Create a vertex buffer from raw byte data.
    pub fn create_vertex_buffer(&self, label: &str, data: &[u8]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }

    /// Create a u32 index buffer.
    pub fn create_index_buffer(&self, label: &str, data: &[u32]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(data),
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            })
    }
}

/// Vertex format of every mesh: position, unit normal and first UV set.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// `(0, 0)` when the source mesh has no texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
            ],
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;

            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                    experimental_features: Default::default(),
                    ..Default::default()
                })
                .await
                .ok()
        })
    }

    fn triangle() -> [Vertex; 3] {
        [
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        ]
    }

    #[test]
    fn test_mesh_buffer_creation() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let mesh = allocator.create_mesh("test-triangle", &triangle(), &[0, 1, 2]);

        assert_eq!(mesh.index_count, 3);
        assert_eq!(mesh.sizes(), (3 * 32, 3 * 4));
    }

    #[test]
    fn test_index_count_matches_input() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let allocator = BufferAllocator::new(&device);
        let indices: &[u32] = &[0, 1, 2, 2, 1, 0, 0, 2, 1]; // 3 triangles

        let mesh = allocator.create_mesh("test", &triangle(), indices);

        assert_eq!(mesh.index_count, 9);
    }

    #[test]
    fn test_vertex_layout() {
        let layout = Vertex::layout();
        // position (f32×3) + normal (f32×3) + uv (f32×2) = 32 bytes stride
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.attributes.len(), 3);
        assert_eq!(layout.attributes[2].offset, 24);
    }

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::offset_of!(Vertex, normal), 12);
        assert_eq!(std::mem::offset_of!(Vertex, uv), 24);
    }
}
