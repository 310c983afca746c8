use std::collections::HashMap;

use instant::Duration;

use crate::{
    anim::tween::{Phase, Tween, lerp},
    dom::{Dom, NodeId, Prop},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenId(pub u64);

/// The interpolation-scheduling interface the page animates through.
///
/// `H` is the completion hook type; finished tweens hand theirs back from
/// [`Animator::tick`] so the caller can react without callbacks.
pub trait Animator<H> {
    /// Start a tween at `now`. A newer tween on the same node and property replaces the older one.
    fn add(&mut self, tween: Tween<H>, now: Duration) -> TweenId;

    /// Jump a property to a value immediately, cancelling any tween on it.
    fn set(&mut self, dom: &mut dyn Dom, node: NodeId, prop: Prop, value: f64);

    /// Last value written for the property, or its natural value.
    fn value(&self, node: NodeId, prop: Prop) -> f64;

    /// Stop every tween on a node where it stands.
    fn kill(&mut self, node: NodeId);

    fn is_animating(&self, node: NodeId, prop: Prop) -> bool;

    /// Advance all tweens to `now`, writing values into the DOM. Returns hooks of finished tweens.
    fn tick(&mut self, now: Duration, dom: &mut dyn Dom) -> Vec<H>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Active<H> {
    id: TweenId,
    started: Duration,
    resolved_from: Option<f64>,
    tween: Tween<H>,
}

/// Frame-driven tween engine.
pub struct TweenEngine<H> {
    next_id: u64,
    active: Vec<Active<H>>,
    values: HashMap<(NodeId, Prop), f64>,
}

impl<H> Default for TweenEngine<H> {
    fn default() -> Self {
        Self {
            next_id: 0,
            active: Vec::new(),
            values: HashMap::new(),
        }
    }
}

impl<H> TweenEngine<H> {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&mut self, dom: &mut dyn Dom, node: NodeId, prop: Prop, value: f64) {
        self.values.insert((node, prop), value);
        dom.apply(node, prop, value);
    }
}

impl<H> Animator<H> for TweenEngine<H> {
    fn add(&mut self, tween: Tween<H>, now: Duration) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.active
            .retain(|a| a.tween.node != tween.node || a.tween.prop != tween.prop);
        self.active.push(Active {
            id,
            started: now,
            resolved_from: tween.from,
            tween,
        });
        id
    }

    fn set(&mut self, dom: &mut dyn Dom, node: NodeId, prop: Prop, value: f64) {
        self.active
            .retain(|a| a.tween.node != node || a.tween.prop != prop);
        self.write(dom, node, prop, value);
    }

    fn value(&self, node: NodeId, prop: Prop) -> f64 {
        self.values
            .get(&(node, prop))
            .copied()
            .unwrap_or_else(|| prop.natural())
    }

    fn kill(&mut self, node: NodeId) {
        self.active.retain(|a| a.tween.node != node);
    }

    fn is_animating(&self, node: NodeId, prop: Prop) -> bool {
        self.active
            .iter()
            .any(|a| a.tween.node == node && a.tween.prop == prop)
    }

    fn tick(&mut self, now: Duration, dom: &mut dyn Dom) -> Vec<H> {
        let mut finished = Vec::new();
        let mut updates = Vec::new();
        for active in self.active.iter_mut() {
            let elapsed = now.saturating_sub(active.started);
            let progress = match active.tween.phase(elapsed) {
                Phase::Waiting => continue,
                Phase::Running(p) => p,
                Phase::Done(p) => {
                    finished.push(active.id);
                    p
                }
            };
            let key = (active.tween.node, active.tween.prop);
            let from = *active.resolved_from.get_or_insert_with(|| {
                self.values
                    .get(&key)
                    .copied()
                    .unwrap_or_else(|| key.1.natural())
            });
            updates.push((key, lerp(from, active.tween.to, progress)));
        }
        for ((node, prop), value) in updates {
            self.write(dom, node, prop, value);
        }

        let mut hooks = Vec::new();
        if !finished.is_empty() {
            let mut remaining = Vec::with_capacity(self.active.len());
            for active in self.active.drain(..) {
                if finished.contains(&active.id) {
                    hooks.extend(active.tween.on_complete);
                } else {
                    remaining.push(active);
                }
            }
            self.active = remaining;
        }
        hooks
    }

    fn len(&self) -> usize {
        self.active.len()
    }
}
