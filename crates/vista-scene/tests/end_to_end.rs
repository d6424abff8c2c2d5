use glam::Vec3;
use vista_config::Config;
use vista_import::ModelImporter;
use vista_render::{FrameStep, Program, Renderable};
use vista_scene::{Model, SceneContext, SceneRenderer, combined_bounds};

fn write_triangle_obj(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("far_triangle.obj");
    std::fs::write(
        &path,
        "o tri\nv 10 20 5\nv 11 22 6\nv 12 21 7\nf 1 2 3\n",
    )
    .unwrap();
    path
}

fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .ok()?;
        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    })
}

#[test]
fn test_import_normalize_and_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_triangle_obj(dir.path());

    let imported = ModelImporter::new().import(&path).unwrap();
    assert_eq!(imported.meshes.len(), 1);

    let model = Model::new(imported, Vec3::ONE);
    assert_eq!(model.directory(), dir.path());

    // Each axis holds {lo, mid, hi}, so the centroid is the bounds center
    // and the recentred positions sum to zero.
    let bounds = combined_bounds(model.meshes());
    assert!(bounds.center().length() < 1e-5);
    let sum: Vec3 = model.meshes()[0]
        .vertices()
        .iter()
        .map(|v| Vec3::from(v.position))
        .sum();
    assert!(sum.length() < 1e-4);

    let scene = SceneContext::new(model, &Config::default()).unwrap();
    let plan = scene.frame_plan();

    let model_draws: Vec<_> = plan.draws().filter(|(r, _, _)| *r == 0).collect();
    assert_eq!(model_draws, vec![(0, 0, 3), (0, 0, 3)]);

    // The shadow map is bound after the depth pass ends and before any
    // color-phase draw.
    let steps = plan.steps();
    let end_depth = steps.iter().position(|s| *s == FrameStep::EndDepthPass).unwrap();
    let bind_shadow = steps
        .iter()
        .position(|s| matches!(s, FrameStep::BindShadowMap { .. }))
        .unwrap();
    let first_color_draw = steps
        .iter()
        .enumerate()
        .skip(end_depth)
        .find(|(_, s)| matches!(s, FrameStep::DrawMesh { .. }))
        .map(|(i, _)| i)
        .unwrap();
    assert!(end_depth < bind_shadow && bind_shadow < first_color_draw);
    assert!(steps.contains(&FrameStep::UseProgram(Program::Sky)));
}

#[test]
fn test_invalid_path_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let result = ModelImporter::new().import(dir.path().join("missing.obj"));
    assert!(result.is_err());
}

#[test]
fn test_offscreen_frame_renders() {
    let Some((device, queue)) = create_test_device() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let imported = ModelImporter::new()
        .import(write_triangle_obj(dir.path()))
        .unwrap();

    let mut config = Config::default();
    config.light.shadow_resolution = 256;
    config.window.width = 64;
    config.window.height = 48;
    let mut scene = SceneContext::new(Model::new(imported, Vec3::ONE), &config).unwrap();

    let format = wgpu::TextureFormat::Rgba8UnormSrgb;
    let mut renderer = SceneRenderer::new(&device, format, &scene, None).unwrap();
    assert_eq!(renderer.shaders().len(), 3);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen-target"),
        size: wgpu::Extent3d {
            width: 64,
            height: 48,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    renderer.prepare(&device, &queue, &mut scene);
    assert!(scene.model.meshes().iter().all(|m| m.is_uploaded() && !m.is_dirty()));
    assert!(scene.model.object_bind_group().is_some());

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("offscreen-frame"),
    });
    renderer.encode(&mut encoder, &view, &scene);
    queue.submit([encoder.finish()]);

    scene.resize(128, 96);
    renderer.resize(&device, 128, 96);
}
