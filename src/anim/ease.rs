/// Easing curves used by the page, named after their GSAP counterparts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power2In,
    Power2Out,
    Power2InOut,
    Power3Out,
    /// Overshoots past the end value before settling; the parameter is the overshoot amount.
    BackOut(f64),
}

impl Ease {
    pub const BACK_OUT: Ease = Ease::BackOut(1.7);

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2In => t * t,
            Self::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
            Self::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
            Self::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u.powi(3) + s * u.powi(2)
            }
        }
    }
}
