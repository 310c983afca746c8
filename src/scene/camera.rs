use cgmath::{Deg, Matrix4, Point3, Vector3};

use crate::config::SceneConfig;

/// cgmath produces OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective camera fixed on a target.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub fovy: Deg<f32>,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    /// The hero camera looking at the origin.
    pub fn hero(config: &SceneConfig, width: f64, height: f64) -> Self {
        let [x, y, z] = config.camera_position;
        let mut camera = Self {
            eye: Point3::new(x, y, z),
            target: Point3::new(0.0, 0.0, 0.0),
            fovy: Deg(config.fov_deg),
            aspect: 1.0,
            near: config.near,
            far: config.far,
        };
        camera.resize(width, height);
        camera
    }

    /// Fit the aspect ratio to a viewport. Degenerate sizes keep the old ratio.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f32;
        }
    }

    pub fn view(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, Vector3::unit_y())
    }

    pub fn projection(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.projection() * self.view()
    }
}
