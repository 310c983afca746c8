//! Page configuration.
//!
//! Every delay, duration and threshold the page uses lives here. The defaults
//! reproduce the production site; any subset can be overridden from JSON, either
//! through the `data-hyperdrive-config` attribute on `<body>` or, for the native
//! preview, a file passed with `--config`.

use anyhow::Context as _;
use instant::Duration;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub loading: LoadingConfig,
    pub nav: NavConfig,
    pub scene: SceneConfig,
    pub scroll: ScrollConfig,
    pub interactions: InteractionConfig,
    pub form: FormConfig,
}

impl PageConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid page configuration")
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoadingConfig {
    /// Time the splash stays up before it starts fading.
    pub delay_ms: u64,
    pub fade_ms: u64,
    pub pulse_ms: u64,
    pub pulse_scale: f64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            fade_ms: 100,
            pulse_ms: 500,
            pulse_scale: 1.05,
        }
    }
}

impl LoadingConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavConfig {
    /// Scroll offset in px above which the nav bar is in its `scrolled` state.
    pub scrolled_threshold: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 100.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: [f32; 3],
    /// Radians per second the car turns once loading is done.
    pub spin_rate: f32,
    pub bob_amplitude: f32,
    pub bob_baseline: f32,
    /// Angular frequency of the bob, in radians per millisecond.
    pub bob_frequency: f32,
    pub initial_rotation: f32,
    pub max_pixel_ratio: f64,
    pub resize_debounce_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_position: [5.0, 2.0, 8.0],
            // 0.005 rad per frame at 60 fps
            spin_rate: 0.3,
            bob_amplitude: 0.1,
            bob_baseline: -1.0,
            bob_frequency: 0.001,
            initial_rotation: 0.3,
            max_pixel_ratio: 1.0,
            resize_debounce_ms: 250,
        }
    }
}

impl SceneConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollConfig {
    /// Momentum scrolling on/off. Off means native scrolling from the start.
    pub smooth: bool,
    pub multiplier: f64,
    /// Fraction of the remaining distance covered per frame.
    pub lerp: f64,
    /// Keep momentum scrolling on coarse-pointer devices. Off by default, touch
    /// screens scroll natively.
    pub touch_smooth: bool,
    /// Arrow-key step in px.
    pub key_step: f64,
    /// Fraction of the viewport height, from the top, a section's top must cross.
    pub trigger_start: f64,
    pub counter_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth: true,
            multiplier: 0.8,
            lerp: 0.1,
            touch_smooth: false,
            key_step: 120.0,
            trigger_start: 0.8,
            counter_ms: 2000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    pub hover_scale: f64,
    pub hover_ms: u64,
    pub gallery_cooldown_ms: u64,
    pub gallery_wheel_factor: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hover_scale: 1.05,
            hover_ms: 300,
            gallery_cooldown_ms: 100,
            gallery_wheel_factor: 2.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    pub success_delay_ms: u64,
    pub reset_delay_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            success_delay_ms: 1000,
            reset_delay_ms: 3000,
        }
    }
}

pub(crate) fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
