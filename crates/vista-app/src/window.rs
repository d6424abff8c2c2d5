//! Window creation and the winit event loop.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use vista_config::Config;
use vista_input::{CursorMode, KeyboardState, MouseState, scroll_lines};
use vista_render::{RenderContext, SurfaceError, init_render_context_blocking};
use vista_scene::{SceneContext, SceneRenderer};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::controls::{ControlResponse, Controls};
use crate::error::AppError;
use crate::frame_clock::FrameClock;

/// Window size in physical pixels, so a `-w 1024 768` window really is
/// 1024x768 pixels on every display.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(PhysicalSize::new(
            config.window.width.max(1),
            config.window.height.max(1),
        ))
}

pub struct AppState {
    config: Config,
    // Field order is drop order: GPU resources go before the device.
    renderer: Option<SceneRenderer>,
    scene: SceneContext,
    gpu: Option<RenderContext>,
    window: Option<Arc<Window>>,
    keyboard: KeyboardState,
    mouse: MouseState,
    controls: Controls,
    clock: FrameClock,
    failure: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config, scene: SceneContext) -> Self {
        let controls = Controls::new(&config);
        Self {
            config,
            renderer: None,
            scene,
            gpu: None,
            window: None,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            controls,
            clock: FrameClock::new(),
            failure: None,
        }
    }

    pub fn scene(&self) -> &SceneContext {
        &self.scene
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// The error that ended the event loop, if any.
    pub fn take_failure(&mut self) -> Option<AppError> {
        self.failure.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let gpu = init_render_context_blocking(window.clone())?;
        let renderer = SceneRenderer::new(
            &gpu.device,
            gpu.surface_format,
            &self.scene,
            self.config.scene.shader_dir.clone(),
        )?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);

        // The window manager may not honor the requested size.
        let (width, height) = self
            .gpu
            .as_ref()
            .map(RenderContext::surface_size)
            .unwrap_or((self.config.window.width, self.config.window.height));
        self.resize(width, height);
        self.set_cursor(self.controls.mode().cursor_mode());
        Ok(())
    }

    /// Propagate a new framebuffer size to the surface, depth buffer,
    /// projection and trackball.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!("Ignoring zero-sized resize ({width}x{height})");
            return;
        }
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(&gpu.device, width, height);
            }
        }
        self.scene.resize(width, height);
        self.controls.resize(width, height);
        info!("Window resized to {}x{}", width, height);
    }

    /// Re-read the window's inner size and resize to it.
    fn refresh_size(&mut self) {
        if let Some(size) = self.window.as_ref().map(|w| w.inner_size()) {
            self.resize(size.width, size.height);
        }
    }

    fn set_cursor(&mut self, mode: CursorMode) {
        self.mouse.set_mode(mode);
        if let Some(window) = &self.window {
            mode.apply(window);
        }
    }

    fn respond(&mut self, event_loop: &ActiveEventLoop, response: ControlResponse) {
        match response {
            ControlResponse::Ignored | ControlResponse::Handled => {}
            ControlResponse::Quit => {
                info!("Escape pressed, shutting down");
                event_loop.exit();
            }
            ControlResponse::SetCursor(mode) => self.set_cursor(mode),
            ControlResponse::ReportFps => {
                info!(
                    "FPS: {:.1} ({} frames)",
                    self.clock.fps(),
                    self.clock.frame_count()
                );
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();

        let look = self.mouse.take_look_delta();
        self.controls.on_look(look, &mut self.scene);
        self.controls.update(dt, &self.keyboard, &mut self.scene);
        self.keyboard.end_frame();

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };
        match renderer.render(gpu, &mut self.scene) {
            Ok(()) => {}
            Err(SurfaceError::Timeout) => debug!("Surface timeout, skipping frame"),
            Err(SurfaceError::Lost) => {
                warn!("Surface lost, reconfiguring");
                self.refresh_size();
            }
            Err(err @ SurfaceError::OutOfMemory) => {
                self.fail(event_loop, err.into());
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.initialize(event_loop) {
            Ok(()) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { .. } => self.refresh_size(),
            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.keyboard.set_modifiers(modifiers.state());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(code) = self.keyboard.process_event(&event) {
                    let response =
                        self.controls
                            .on_key(code, self.keyboard.shift(), &mut self.scene);
                    self.respond(event_loop, response);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let cursor = self.mouse.on_cursor_moved(position.x, position.y);
                self.controls.on_cursor_moved(cursor, &mut self.scene);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
                let response = self
                    .controls
                    .on_button(button, state, self.mouse.position());
                self.respond(event_loop, response);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.controls
                    .on_wheel(scroll_lines(delta), &mut self.scene);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse.on_raw_motion(delta.0, delta.1);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!(
            "Shutting down after {} frames",
            self.clock.frame_count()
        );
        self.renderer = None;
        self.scene.release();
    }
}

/// Create the event loop and run the viewer until the window closes.
#[instrument(skip_all)]
pub fn run(config: Config, scene: SceneContext) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, scene);
    event_loop.run_app(&mut app)?;
    match app.take_failure() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use vista_render::{GeometryBuffer, Vertex};
    use vista_scene::Model;

    fn app() -> AppState {
        let config = Config::default();
        let quad = GeometryBuffer::new(
            vec![
                Vertex::new([-1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
                Vertex::new([1.0, -1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
                Vertex::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
            ],
            vec![0, 1, 2],
        );
        let scene =
            SceneContext::new(Model::from_geometry(vec![quad], Vec3::ONE), &config).unwrap();
        AppState::new(config, scene)
    }

    #[test]
    fn test_new_app_has_no_window() {
        let mut app = app();
        assert!(app.window.is_none());
        assert!(app.gpu.is_none());
        assert!(app.take_failure().is_none());
        assert_eq!(app.scene().viewport(), (800, 600));
    }

    #[test]
    fn test_resize_without_gpu_updates_scene_and_trackball() {
        let mut app = app();
        app.resize(1024, 768);
        assert_eq!(app.scene().viewport(), (1024, 768));
        assert!((app.scene().camera.aspect - 1024.0 / 768.0).abs() < 1e-6);
        assert_eq!(app.controls().trackball().viewport(), (1024.0, 768.0));
    }

    #[test]
    fn test_zero_resize_is_ignored() {
        let mut app = app();
        app.resize(0, 0);
        assert_eq!(app.scene().viewport(), (800, 600));
        assert_eq!(app.controls().trackball().viewport(), (800.0, 600.0));
    }

    #[test]
    fn test_window_attributes_use_config_title() {
        let mut config = Config::default();
        config.window.title = "Viewer".to_string();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Viewer");
    }
}
