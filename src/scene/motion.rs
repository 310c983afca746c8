//! Idle animation of the car: a slow turn and a gentle bob.

use cgmath::{Rad, Rotation3};
use instant::Duration;

use crate::{config::SceneConfig, scene::transform::Transform};

/// Height of the car group at page time `t_ms`.
pub fn bob_height(config: &SceneConfig, t_ms: f64) -> f32 {
    config.bob_baseline + (t_ms * config.bob_frequency as f64).sin() as f32 * config.bob_amplitude
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarMotion {
    spin: f32,
    last: Option<Duration>,
}

impl CarMotion {
    /// Rest pose: baseline height, initial heading.
    pub fn rest(config: &SceneConfig) -> Transform {
        Transform {
            rotation: cgmath::Quaternion::from_angle_y(Rad(config.initial_rotation)),
            ..Transform::at(0.0, config.bob_baseline, 0.0)
        }
    }

    pub fn angle(&self, config: &SceneConfig) -> f32 {
        config.initial_rotation + self.spin
    }

    /// Move the group to `now`. Nothing moves while the page is still loading.
    pub fn advance(&mut self, group: &mut Transform, config: &SceneConfig, loading: bool, now: Duration) {
        let dt = self
            .last
            .replace(now)
            .map(|last| now.saturating_sub(last))
            .unwrap_or_default();
        if loading {
            return;
        }
        self.spin = (self.spin + config.spin_rate * dt.as_secs_f32()) % std::f32::consts::TAU;
        group.rotation = cgmath::Quaternion::from_angle_y(Rad(self.angle(config)));
        group.position.y = bob_height(config, now.as_secs_f64() * 1000.0);
    }
}
