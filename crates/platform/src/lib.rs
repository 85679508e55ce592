//! Platform layer: windowing, keyboard input & the per-frame loop.
//!
//! Each redraw runs controller -> camera -> uniforms -> GPU, then asks winit
//! for the next redraw. Everything happens on the event-loop thread.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use renderer::GpuState;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

pub mod fps;
pub mod scene;

use fps::FpsCounter;
use scene::{DemoScene, build_demo_mesh};

const TITLE: &str = "Svarog3D";

/// Settings gathered from the command line.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub backends: wgpu::Backends,
    pub show_fps: bool,
    pub width: u32,
    pub height: u32,
    pub fov_deg: f32,
    pub camera_speed: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            show_fps: false,
            width: 1280,
            height: 720,
            fov_deg: 45.0,
            camera_speed: corelib::CameraController::DEFAULT_SPEED,
        }
    }
}

/// Open a window and draw the demo scene until it is closed.
pub fn run_with_renderer(config: RunConfig) -> Result<()> {
    let aspect = config.width.max(1) as f32 / config.height.max(1) as f32;
    let scene = DemoScene::new(aspect, config.fov_deg.to_radians(), config.camera_speed)
        .context("Invalid camera configuration")?;

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new(config, scene);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct DemoApp {
    config: RunConfig,
    scene: DemoScene,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    fps: FpsCounter,
    skipped_frames: u64,
    fatal: Option<anyhow::Error>,
}

impl DemoApp {
    fn new(config: RunConfig, scene: DemoScene) -> Self {
        Self {
            config,
            scene,
            window: None,
            gpu: None,
            fps: FpsCounter::new(Instant::now()),
            skipped_frames: 0,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("Failed to create window")?,
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let mesh = build_demo_mesh();
        let gpu = pollster::block_on(GpuState::new(window.clone(), self.config.backends, &mesh))?;
        self.sync_aspect(gpu.aspect());

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn sync_aspect(&mut self, aspect: f32) {
        if let Err(err) = self.scene.camera.set_aspect(aspect) {
            log::warn!("Keeping previous aspect: {err}");
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let name = match &event.logical_key {
            Key::Named(NamedKey::Escape) => {
                if event.state == ElementState::Pressed {
                    log::info!("Escape pressed. Exiting event loop.");
                    event_loop.exit();
                }
                return;
            }
            Key::Character(s) => s.to_string(),
            Key::Named(named) => format!("{named:?}"),
            _ => return,
        };
        match event.state {
            ElementState::Pressed => self.scene.input.press(&name),
            ElementState::Released => self.scene.input.release(&name),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let uniforms = match self.scene.tick() {
            Ok(u) => u,
            Err(err) => {
                self.skipped_frames += 1;
                log::warn!("Skipping frame ({} skipped so far): {err}", self.skipped_frames);
                return;
            }
        };

        match gpu.render(&uniforms) {
            Ok(()) => {}
            Err(e) if GpuState::is_surface_lost(&e) => {
                log::warn!("Surface lost/outdated, reconfiguring: {e:?}");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
                return;
            }
            Err(e) => log::warn!("Dropped frame: {e:?}"),
        }

        if self.config.show_fps {
            if let Some(rate) = self.fps.tick(Instant::now()) {
                log::info!("FPS: {rate:.1}");
                if let Some(window) = &self.window {
                    window.set_title(&format!("{TITLE} - {rate:.0} fps"));
                }
            }
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::info!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                    let aspect = gpu.aspect();
                    self.sync_aspect(aspect);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::info!("Scale factor changed: {scale_factor:.3}");
            }
            WindowEvent::Focused(false) => {
                self.scene.input.clear();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
