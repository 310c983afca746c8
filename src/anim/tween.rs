use instant::Duration;

use crate::{
    anim::ease::Ease,
    dom::{NodeId, Prop},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Never,
    Times(u32),
    Forever,
}

/// One property of one element interpolated over time.
///
/// `from: None` means "whatever the property holds when the tween starts".
/// `on_complete` is handed back by the engine once the tween has finished.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<H> {
    pub node: NodeId,
    pub prop: Prop,
    pub from: Option<f64>,
    pub to: f64,
    pub duration: Duration,
    pub delay: Duration,
    pub ease: Ease,
    pub repeat: Repeat,
    pub yoyo: bool,
    pub on_complete: Option<H>,
}

/// Where a tween is at a given local time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Waiting,
    /// Eased progress in `0..=1` (can leave that range for overshooting curves).
    Running(f64),
    Done(f64),
}

impl<H> Tween<H> {
    pub fn to(node: NodeId, prop: Prop, to: f64, duration: Duration) -> Self {
        Self {
            node,
            prop,
            from: None,
            to,
            duration,
            delay: Duration::ZERO,
            ease: Ease::Power2Out,
            repeat: Repeat::Never,
            yoyo: false,
            on_complete: None,
        }
    }

    pub fn from(mut self, value: f64) -> Self {
        self.from = Some(value);
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn on_complete(mut self, hook: H) -> Self {
        self.on_complete = Some(hook);
        self
    }

    fn cycles(&self) -> Option<u32> {
        match self.repeat {
            Repeat::Never => Some(1),
            Repeat::Times(n) => Some(n + 1),
            Repeat::Forever => None,
        }
    }

    /// Delay plus all repetitions; `None` for endless tweens.
    pub fn total(&self) -> Option<Duration> {
        self.cycles().map(|c| self.delay + self.duration * c)
    }

    /// Progress at `elapsed` since the tween was added.
    pub fn phase(&self, elapsed: Duration) -> Phase {
        let Some(local) = elapsed.checked_sub(self.delay) else {
            return Phase::Waiting;
        };
        if let Some(cycles) = self.cycles() {
            if local >= self.duration * cycles {
                // a yoyo with an even number of plays ends where it started
                let end = if self.yoyo && cycles % 2 == 0 { 0.0 } else { 1.0 };
                return Phase::Done(self.ease.apply(end));
            }
        }
        if self.duration.is_zero() {
            return Phase::Running(1.0);
        }
        let cycle_len = self.duration.as_secs_f64();
        let local = local.as_secs_f64();
        let cycle = (local / cycle_len).floor();
        let mut t = (local - cycle * cycle_len) / cycle_len;
        if self.yoyo && cycle as u64 % 2 == 1 {
            t = 1.0 - t;
        }
        Phase::Running(self.ease.apply(t))
    }
}

pub fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}
