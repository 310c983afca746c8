use instant::Duration;

use crate::{
    anim::{Ease, Position, Timeline, Tween},
    dom::{NodeId, Prop},
    page::{Hook, PageCtx},
};

/// One line of the hero entrance: which elements, where they start from, how they arrive.
struct Step {
    selector: &'static str,
    y: f64,
    duration_ms: u64,
    ease: Ease,
    position: Position,
}

const STEPS: [Step; 3] = [
    Step {
        selector: ".hero-title",
        y: 100.0,
        duration_ms: 1500,
        ease: Ease::Power3Out,
        position: Position::End,
    },
    Step {
        selector: ".hero-subtitle",
        y: 50.0,
        duration_ms: 1000,
        ease: Ease::Power2Out,
        position: Position::Overlap(Duration::from_millis(800)),
    },
    Step {
        selector: ".cta-button",
        y: 30.0,
        duration_ms: 800,
        ease: Ease::BACK_OUT,
        position: Position::Overlap(Duration::from_millis(500)),
    },
];

/// Title, subtitle and call to action sliding in once loading is over.
#[derive(Debug)]
pub struct HeroIntro {
    groups: Vec<Vec<NodeId>>,
    started: bool,
}

impl HeroIntro {
    /// Hide the hero copy in its starting position.
    pub fn init(ctx: &mut PageCtx) -> Self {
        let mut groups = Vec::with_capacity(STEPS.len());
        for step in &STEPS {
            let nodes = ctx.dom.query_all(step.selector);
            for &node in &nodes {
                ctx.anim.set(&mut *ctx.dom, node, Prop::Y, step.y);
                ctx.anim.set(&mut *ctx.dom, node, Prop::Opacity, 0.0);
            }
            groups.push(nodes);
        }
        Self {
            groups,
            started: false,
        }
    }

    pub fn start(&mut self, ctx: &mut PageCtx) {
        if self.started {
            return;
        }
        self.started = true;
        let mut timeline = Timeline::<Hook>::new();
        for (step, nodes) in STEPS.iter().zip(&self.groups) {
            let duration = Duration::from_millis(step.duration_ms);
            let tweens = nodes.iter().flat_map(|&node| {
                [Prop::Y, Prop::Opacity]
                    .map(|prop| Tween::to(node, prop, prop.natural(), duration).ease(step.ease))
            });
            timeline = timeline.add_all(tweens, step.position);
        }
        log::debug!("hero entrance runs for {:?}", timeline.duration());
        for tween in timeline.into_tweens() {
            ctx.anim.add(tween, ctx.now);
        }
    }

    pub fn has_started(&self) -> bool {
        self.started
    }
}
