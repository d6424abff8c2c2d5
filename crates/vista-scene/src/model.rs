//! The imported model: its meshes, a local-to-world transform and a flat
//! base color.

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use vista_import::ImportedModel;
use vista_render::{
    CullFace, GeometryBuffer, ObjectBinding, ObjectUniform, Program, Renderable, RenderableKind,
};

use crate::bounds::center_to_origin;

pub struct Model {
    meshes: Vec<GeometryBuffer>,
    transform: Mat4,
    directory: PathBuf,
    color: Vec3,
    binding: Option<ObjectBinding>,
}

impl Model {
    /// Take ownership of an imported model and center it on the origin.
    ///
    /// Degenerate bounds are logged and the geometry is kept as imported.
    pub fn new(imported: ImportedModel, color: Vec3) -> Self {
        let directory = imported.directory.clone();
        let mut model = Self::from_geometry(imported.into_geometry(), color);
        model.directory = directory;
        model
    }

    pub fn from_geometry(mut meshes: Vec<GeometryBuffer>, color: Vec3) -> Self {
        if let Err(e) = center_to_origin(&mut meshes) {
            log::warn!("Model left uncentered: {}", e);
        }
        Self {
            meshes,
            transform: Mat4::IDENTITY,
            directory: PathBuf::new(),
            color,
            binding: None,
        }
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    pub fn meshes(&self) -> &[GeometryBuffer] {
        &self.meshes
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Move in world space.
    pub fn translate(&mut self, offset: Vec3) {
        self.transform = Mat4::from_translation(offset) * self.transform;
    }

    /// Rotate by `angle` radians about a world-space `axis` through the
    /// model's current position. Zero axes are ignored.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let pivot = self.position();
        self.transform = Mat4::from_translation(pivot)
            * Mat4::from_axis_angle(axis, angle)
            * Mat4::from_translation(-pivot)
            * self.transform;
    }

    /// Scale in model space.
    pub fn scale(&mut self, factor: Vec3) {
        self.transform *= Mat4::from_scale(factor);
    }

    pub fn reset(&mut self) {
        self.transform = Mat4::IDENTITY;
    }

    /// Upload dirty meshes and create the object bind group on first use.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        object_layout: &wgpu::BindGroupLayout,
    ) {
        for (i, mesh) in self.meshes.iter_mut().enumerate() {
            mesh.upload(device, queue, &format!("model-mesh-{i}"));
        }
        if self.binding.is_none() {
            let uniform = ObjectUniform::new(self.transform, Mat4::IDENTITY, self.color);
            self.binding = Some(ObjectBinding::new(device, object_layout, "model-object", &uniform));
        }
    }

    /// Free GPU buffers; the CPU copy stays and can be uploaded again.
    pub fn release(&mut self) {
        for mesh in &mut self.meshes {
            mesh.release();
        }
        self.binding = None;
    }
}

impl Renderable for Model {
    fn kind(&self) -> RenderableKind {
        RenderableKind::Model
    }

    fn shadow_cull(&self) -> Option<CullFace> {
        // Front faces culled in the depth pass to reduce acne on the model.
        Some(CullFace::Front)
    }

    fn program(&self) -> Program {
        Program::Lit
    }

    fn geometry(&self) -> &[GeometryBuffer] {
        &self.meshes
    }

    fn object_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.binding.as_ref().map(|b| &b.bind_group)
    }

    fn send_matrix_to_shader(&self, queue: &wgpu::Queue, view: Mat4) {
        if let Some(binding) = &self.binding {
            binding.write(queue, &ObjectUniform::new(self.transform, view, self.color));
        }
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("meshes", &self.meshes.len())
            .field("transform", &self.transform)
            .field("directory", &self.directory)
            .field("uploaded", &self.binding.is_some())
            .finish()
    }
}
