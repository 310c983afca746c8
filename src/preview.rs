//! Desktop preview of the hero scene.
//!
//! Opens a winit window and renders the car with the same [`GpuRenderer`] the
//! page uses, minus the page around it: the loading gate is skipped so the car
//! turns right away.

use std::sync::Arc;

use anyhow::Context as _;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::PageConfig,
    scene::{GpuRenderer, SceneBackend, SceneState},
};

pub struct PreviewApp {
    async_runtime: tokio::runtime::Runtime,
    config: PageConfig,
    window: Option<Arc<Window>>,
    renderer: Option<GpuRenderer>,
    scene: SceneState,
    started: Instant,
}

impl PreviewApp {
    pub fn new(async_runtime: tokio::runtime::Runtime, config: PageConfig) -> Self {
        let scene = SceneState::new(&config.scene, 1280.0, 720.0);
        Self {
            async_runtime,
            config,
            window: None,
            renderer: None,
            scene,
            started: Instant::now(),
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.scene
            .camera
            .resize(size.width as f64, size.height as f64);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(size.width, size.height);
        }
    }
}

impl ApplicationHandler for PreviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("HyperDrive")
            .with_transparent(true)
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not open a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.scene
            .camera
            .resize(size.width as f64, size.height as f64);
        let setup = GpuRenderer::new(window.clone(), size.width, size.height, &self.scene);
        match self.async_runtime.block_on(setup) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.dispose();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::RedrawRequested => {
                self.scene
                    .advance(&self.config.scene, false, self.started.elapsed());
                if let Some(renderer) = self.renderer.as_mut() {
                    if let Err(e) = renderer.render(&self.scene) {
                        log::warn!("{}", e);
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

pub fn run(config: PageConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let async_runtime = tokio::runtime::Runtime::new().context("could not start the async runtime")?;
    let event_loop = EventLoop::new().context("could not create an event loop")?;
    let mut app = PreviewApp::new(async_runtime, config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
