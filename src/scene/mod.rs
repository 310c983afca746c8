//! The hero's 3D car.
//!
//! - [`car`] lists the parts the car is assembled from
//! - [`mesh`] turns them into one flat-shaded vertex list
//! - [`camera`], [`light`] and [`transform`] hold the rest of the scene
//! - [`motion`] is the idle turn-and-bob animation
//! - [`gpu`] draws it all with wgpu
//!
//! [`HeroScene`] is the page component. It creates the canvas, receives the
//! renderer once it has been set up (or the reason it could not be), and swaps
//! in the static fallback image when there is no renderer.

pub mod camera;
pub mod car;
pub mod gpu;
pub mod light;
pub mod mesh;
pub mod motion;
pub mod transform;

use instant::Duration;

use crate::{
    config::SceneConfig,
    dom::NodeId,
    page::PageCtx,
    scene::{
        camera::PerspectiveCamera, car::CarPart, light::LightRig, motion::CarMotion,
        transform::Transform,
    },
};

pub use gpu::{CarPipeline, GpuRenderer};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("no #car-container element on the page")]
    MissingContainer,
    #[error("could not create a drawing surface: {0}")]
    Surface(String),
    #[error("no suitable graphics adapter: {0}")]
    Adapter(String),
    #[error("could not open the graphics device: {0}")]
    Device(String),
    #[error("frame failed: {0}")]
    Frame(String),
}

/// What the renderer draws.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub camera: PerspectiveCamera,
    pub lights: LightRig,
    pub parts: Vec<CarPart>,
    /// Placement of the whole car.
    pub group: Transform,
    pub motion: CarMotion,
}

impl SceneState {
    pub fn new(config: &SceneConfig, width: f64, height: f64) -> Self {
        Self {
            camera: PerspectiveCamera::hero(config, width, height),
            lights: LightRig::hero(),
            parts: car::parts(),
            group: CarMotion::rest(config),
            motion: CarMotion::default(),
        }
    }

    pub fn advance(&mut self, config: &SceneConfig, loading: bool, now: Duration) {
        self.motion.advance(&mut self.group, config, loading, now);
    }
}

/// A renderer for [`SceneState`].
pub trait SceneBackend {
    /// New drawing buffer size in physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    fn render(&mut self, scene: &SceneState) -> Result<(), SceneError>;

    /// Release GPU resources. Rendering afterwards is a no-op.
    fn dispose(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneVisibility {
    /// Canvas created, renderer not ready yet.
    Pending,
    Canvas,
    Fallback,
    /// No car container on the page, or no fallback image to swap in.
    Absent,
}

pub struct HeroScene {
    container: Option<NodeId>,
    canvas: Option<NodeId>,
    fallback: Option<NodeId>,
    state: SceneState,
    backend: Option<Box<dyn SceneBackend>>,
    visibility: SceneVisibility,
}

impl HeroScene {
    pub fn init(ctx: &mut PageCtx) -> Self {
        let (width, height) = ctx.dom.viewport();
        let container = ctx.dom.by_id("car-container");
        let mut scene = Self {
            container,
            canvas: None,
            fallback: ctx.dom.by_id("fallback-image"),
            state: SceneState::new(&ctx.config.scene, width, height),
            backend: None,
            visibility: SceneVisibility::Absent,
        };
        let Some(container) = container else {
            log::debug!("{}", SceneError::MissingContainer);
            return scene;
        };
        scene.canvas = ctx.dom.create_child(container, "canvas", None, "");
        if scene.canvas.is_some() {
            scene.visibility = SceneVisibility::Pending;
        } else {
            scene.show_fallback(ctx, &SceneError::Surface("canvas element unavailable".into()));
        }
        scene
    }

    /// Take the renderer, or fall back to the static image if there is none.
    pub fn attach(&mut self, ctx: &mut PageCtx, backend: Result<Box<dyn SceneBackend>, SceneError>) {
        if self.visibility != SceneVisibility::Pending {
            if let Ok(mut backend) = backend {
                backend.dispose();
            }
            return;
        }
        match backend {
            Ok(backend) => {
                self.backend = Some(backend);
                self.visibility = SceneVisibility::Canvas;
                let (width, height) = ctx.dom.viewport();
                self.resize(ctx, width, height);
                log::info!("3D scene ready");
            }
            Err(e) => self.show_fallback(ctx, &e),
        }
    }

    fn show_fallback(&mut self, ctx: &mut PageCtx, reason: &SceneError) {
        log::warn!("{}, showing the fallback image", reason);
        let (Some(fallback), Some(container)) = (self.fallback, self.container) else {
            log::debug!("no fallback image, leaving the hero as is");
            self.visibility = SceneVisibility::Absent;
            return;
        };
        ctx.dom.remove_class(fallback, "hidden");
        ctx.dom.set_display(container, Some("none"));
        self.visibility = SceneVisibility::Fallback;
    }

    pub fn frame(&mut self, ctx: &PageCtx, now: Duration) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        self.state.advance(&ctx.config.scene, ctx.loading, now);
        if let Err(e) = backend.render(&self.state) {
            log::warn!("{}", e);
        }
    }

    /// Fit camera and drawing buffer to a new viewport (CSS pixels).
    pub fn resize(&mut self, ctx: &PageCtx, width: f64, height: f64) {
        self.state.camera.resize(width, height);
        if let Some(backend) = self.backend.as_mut() {
            let (w, h) = physical_size(&ctx.config.scene, ctx.dom.device_pixel_ratio(), width, height);
            backend.resize(w, h);
        }
    }

    pub fn dispose(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            backend.dispose();
        }
    }

    pub fn visibility(&self) -> SceneVisibility {
        self.visibility
    }

    pub fn canvas(&self) -> Option<NodeId> {
        self.canvas
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }
}

/// Drawing buffer size for a CSS viewport, with the pixel ratio capped.
pub fn physical_size(config: &SceneConfig, device_pixel_ratio: f64, width: f64, height: f64) -> (u32, u32) {
    let ratio = device_pixel_ratio.min(config.max_pixel_ratio).max(0.0);
    let scale = |v: f64| ((v * ratio).round() as u32).max(1);
    (scale(width), scale(height))
}
