//! Spec-sheet counters.
//!
//! Each `.spec-number` carries its final value in `data-target`. When the specs
//! section comes into view the number counts up from zero; whole targets only ever
//! show whole numbers, fractional ones are shown to one decimal.

use instant::Duration;

use crate::{
    anim::{Animator, Ease, Tween},
    dom::{Dom, NodeId, Prop},
    page::Hook,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CounterFormat {
    Integer,
    OneDecimal,
}

impl CounterFormat {
    pub fn for_target(target: f64) -> Self {
        if target.fract() == 0.0 {
            CounterFormat::Integer
        } else {
            CounterFormat::OneDecimal
        }
    }

    pub fn snap(self, value: f64) -> f64 {
        match self {
            CounterFormat::Integer => value.round(),
            CounterFormat::OneDecimal => (value * 10.0).round() / 10.0,
        }
    }

    pub fn display(self, value: f64) -> String {
        match self {
            CounterFormat::Integer => format!("{}", self.snap(value) as i64),
            // f64's Display drops a trailing ".0", same as the page always did
            CounterFormat::OneDecimal => format!("{}", self.snap(value)),
        }
    }
}

/// Read a counter's target from its `data-target` attribute.
pub fn target_of(dom: &mut dyn Dom, node: NodeId) -> Option<f64> {
    let raw = dom.attr(node, "data-target")?;
    match raw.trim().parse::<f64>() {
        Ok(target) if target.is_finite() => Some(target),
        _ => {
            log::warn!("ignoring counter with unreadable data-target {:?}", raw);
            None
        }
    }
}

/// Start counting every node up from zero to its target.
pub fn start(
    anim: &mut dyn Animator<Hook>,
    dom: &mut dyn Dom,
    nodes: &[NodeId],
    duration: Duration,
    now: Duration,
) {
    for &node in nodes {
        let Some(target) = target_of(dom, node) else {
            continue;
        };
        let prop = Prop::Counter(CounterFormat::for_target(target));
        anim.add(
            Tween::to(node, prop, target, duration)
                .from(0.0)
                .ease(Ease::Power2Out),
            now,
        );
    }
}
