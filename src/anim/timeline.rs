use instant::Duration;

use crate::{anim::tween::Tween, dom::NodeId};

/// Where a tween is placed relative to the timeline built so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Right after the current end (`">"`).
    End,
    /// Overlapping the current end (`"-=x"`).
    Overlap(Duration),
    /// Absolute offset from the timeline start.
    At(Duration),
}

/// Sequences tweens by converting timeline positions into start delays.
#[derive(Debug)]
pub struct Timeline<H> {
    end: Duration,
    tweens: Vec<Tween<H>>,
}

impl<H> Default for Timeline<H> {
    fn default() -> Self {
        Self {
            end: Duration::ZERO,
            tweens: Vec::new(),
        }
    }
}

impl<H> Timeline<H> {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_of(&self, position: Position) -> Duration {
        match position {
            Position::End => self.end,
            Position::Overlap(by) => self.end.saturating_sub(by),
            Position::At(at) => at,
        }
    }

    pub fn add(self, tween: Tween<H>, position: Position) -> Self {
        self.add_all([tween], position)
    }

    /// Place several tweens at the same position, like one tween with many targets.
    pub fn add_all(mut self, tweens: impl IntoIterator<Item = Tween<H>>, position: Position) -> Self {
        let start = self.start_of(position);
        let mut end = self.end;
        for mut tween in tweens {
            tween.delay += start;
            if let Some(total) = tween.total() {
                end = end.max(total);
            }
            self.tweens.push(tween);
        }
        self.end = end;
        self
    }

    pub fn duration(&self) -> Duration {
        self.end
    }

    pub fn into_tweens(self) -> Vec<Tween<H>> {
        self.tweens
    }
}

/// One tween per node, each starting `each` after the previous one.
pub fn stagger<H>(
    nodes: &[NodeId],
    each: Duration,
    mut make: impl FnMut(NodeId) -> Tween<H>,
) -> Vec<Tween<H>> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let tween = make(*node);
            let delay = tween.delay + each * i as u32;
            tween.delay(delay)
        })
        .collect()
}
