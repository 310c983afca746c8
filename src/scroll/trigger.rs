use instant::Duration;

use crate::{
    anim::{Animator, Ease, Tween, stagger},
    dom::{Dom, NodeId, Prop, Rect},
    page::Hook,
    scroll::adapter::ScrollerProxy,
};

/// Extra work a reveal asks for when it fires.
#[derive(Clone, Debug, PartialEq)]
pub enum EnterAction {
    Counters(Vec<NodeId>),
}

/// A one-shot "animate in from here" description for a group of elements.
#[derive(Clone, Debug, PartialEq)]
pub struct Entrance {
    pub targets: Vec<NodeId>,
    /// Starting values; every property ends at its natural value.
    pub from: Vec<(Prop, f64)>,
    pub duration: Duration,
    pub stagger: Duration,
    pub ease: Ease,
}

impl Entrance {
    /// Put every target into its starting state.
    pub fn prime(&self, anim: &mut dyn Animator<Hook>, dom: &mut dyn Dom) {
        for &node in &self.targets {
            for &(prop, value) in &self.from {
                anim.set(dom, node, prop, value);
            }
        }
    }

    pub fn play(&self, anim: &mut dyn Animator<Hook>, now: Duration) {
        for &(prop, _) in &self.from {
            let tweens = stagger(&self.targets, self.stagger, |node| {
                Tween::to(node, prop, prop.natural(), self.duration).ease(self.ease)
            });
            for tween in tweens {
                anim.add(tween, now);
            }
        }
    }
}

#[derive(Debug)]
struct Reveal {
    trigger: NodeId,
    top: Option<f64>,
    fired: bool,
    entrance: Entrance,
    action: Option<EnterAction>,
}

/// A property bound to scroll progress through a trigger element, from
/// "trigger top at viewport bottom" to "trigger bottom at viewport top".
#[derive(Debug)]
struct Scrub {
    trigger: NodeId,
    target: NodeId,
    prop: Prop,
    from: f64,
    to: f64,
    span: Option<(f64, f64)>,
    last: Option<f64>,
}

/// Scroll-position driven animations.
///
/// Section geometry is measured in document coordinates on [`refresh`](Self::refresh)
/// and reused by every [`update`](Self::update) until the next refresh.
#[derive(Debug)]
pub struct TriggerRegistry {
    start: f64,
    reveals: Vec<Reveal>,
    scrubs: Vec<Scrub>,
}

impl TriggerRegistry {
    /// `start` is the fraction of the viewport height, from the top, that a
    /// section's top has to cross.
    pub fn new(start: f64) -> Self {
        Self {
            start,
            reveals: Vec::new(),
            scrubs: Vec::new(),
        }
    }

    pub fn reveal(
        &mut self,
        trigger: NodeId,
        entrance: Entrance,
        action: Option<EnterAction>,
        anim: &mut dyn Animator<Hook>,
        dom: &mut dyn Dom,
    ) {
        entrance.prime(anim, dom);
        self.reveals.push(Reveal {
            trigger,
            top: None,
            fired: false,
            entrance,
            action,
        });
    }

    pub fn scrub(&mut self, trigger: NodeId, target: NodeId, prop: Prop, from: f64, to: f64) {
        self.scrubs.push(Scrub {
            trigger,
            target,
            prop,
            from,
            to,
            span: None,
            last: None,
        });
    }

    pub fn has_fired(&self, trigger: NodeId) -> bool {
        self.reveals
            .iter()
            .any(|r| r.trigger == trigger && r.fired)
    }

    pub fn pending(&self) -> usize {
        self.reveals.iter().filter(|r| !r.fired).count()
    }

    /// Re-measure every trigger. The scroller's refresh hook runs first so the
    /// measurement sees its updated bounds.
    pub fn refresh(&mut self, dom: &mut dyn Dom, scroller: &mut dyn ScrollerProxy) {
        scroller.refresh(dom);
        let scroll = scroller.scroll_top();
        let viewport = scroller.bounding_rect(&*dom).height;
        for reveal in self.reveals.iter_mut() {
            reveal.top = dom.rect(reveal.trigger).map(|r| r.top + scroll);
        }
        for scrub in self.scrubs.iter_mut() {
            scrub.span = dom.rect(scrub.trigger).map(|r| {
                let top = r.top + scroll;
                (top - viewport, top + r.height)
            });
        }
    }

    /// Fire reveals that crossed the threshold and move scrubbed properties.
    pub fn update(
        &mut self,
        scroll: f64,
        viewport: Rect,
        anim: &mut dyn Animator<Hook>,
        dom: &mut dyn Dom,
        now: Duration,
    ) -> Vec<EnterAction> {
        let threshold = viewport.height * self.start;
        let mut actions = Vec::new();
        for reveal in self.reveals.iter_mut().filter(|r| !r.fired) {
            let Some(top) = reveal.top else {
                continue;
            };
            if top - scroll <= threshold {
                reveal.fired = true;
                reveal.entrance.play(anim, now);
                actions.extend(reveal.action.clone());
            }
        }
        for scrub in self.scrubs.iter_mut() {
            let Some((start, end)) = scrub.span else {
                continue;
            };
            let progress = if end > start {
                ((scroll - start) / (end - start)).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let value = scrub.from + (scrub.to - scrub.from) * progress;
            if scrub.last != Some(value) {
                scrub.last = Some(value);
                anim.set(dom, scrub.target, scrub.prop, value);
            }
        }
        actions
    }
}
