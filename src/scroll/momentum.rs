use crate::{
    bus::ScrollKey,
    config::ScrollConfig,
    dom::{Dom, NodeId, Prop},
};

pub const CONTAINER_SELECTOR: &str = "[data-scroll-container]";

/// Set on `<html>` while the momentum scroller owns the page.
pub const SMOOTH_CLASS: &str = "has-scroll-smooth";

/// Page keys scroll a viewport minus this overlap.
const PAGE_OVERLAP: f64 = 40.0;

/// Distance in px under which the smoothed offset snaps onto the target.
const SNAP: f64 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum ScrollError {
    #[error("momentum scrolling is disabled")]
    Disabled,
    #[error("momentum scrolling is off on touch devices")]
    TouchDevice,
    #[error("no {} element on the page", CONTAINER_SELECTOR)]
    MissingContainer,
}

/// Inertia-style scrolling of a container translated against the viewport.
///
/// Wheel and key input move a target offset; every frame the rendered offset
/// covers a fixed fraction of the remaining distance. Anything that still
/// scrolls the window natively (scrollbar drags, find-in-page) is taken over
/// through [`MomentumScroll::absorb`].
#[derive(Debug)]
pub struct MomentumScroll {
    container: NodeId,
    root: Option<NodeId>,
    current: f64,
    target: f64,
    limit: f64,
    multiplier: f64,
    lerp: f64,
    key_step: f64,
}

impl MomentumScroll {
    pub fn new(dom: &mut dyn Dom, config: &ScrollConfig) -> Result<Self, ScrollError> {
        if !config.smooth {
            return Err(ScrollError::Disabled);
        }
        if dom.is_touch_device() && !config.touch_smooth {
            return Err(ScrollError::TouchDevice);
        }
        let container = dom
            .query(CONTAINER_SELECTOR)
            .ok_or(ScrollError::MissingContainer)?;
        let root = dom.query("html");
        if let Some(root) = root {
            dom.add_class(root, SMOOTH_CLASS);
        }
        let mut scroll = Self {
            container,
            root,
            current: 0.0,
            target: 0.0,
            limit: 0.0,
            multiplier: config.multiplier,
            lerp: config.lerp.clamp(0.01, 1.0),
            key_step: config.key_step,
        };
        dom.set_style(container, Prop::Y, 0.0);
        scroll.update(dom);
        // a restored scroll position carries over into the container
        let restored = dom.window_scroll();
        if restored > 0.0 {
            dom.scroll_window_to(0.0);
            scroll.jump_to(dom, restored);
        }
        Ok(scroll)
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn offset(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Recompute the scrollable range from the container's content height.
    pub fn update(&mut self, dom: &mut dyn Dom) {
        let (_, viewport_height) = dom.viewport();
        self.limit = (dom.scroll_height(self.container) - viewport_height).max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        if self.current > self.limit {
            self.current = self.limit;
            dom.set_style(self.container, Prop::Y, -self.current);
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64) {
        self.target = (self.target + delta_y * self.multiplier).clamp(0.0, self.limit);
    }

    /// Keyboard scrolling: arrows by the key step, page keys by a viewport.
    pub fn on_key(&mut self, dom: &dyn Dom, key: ScrollKey) {
        let (_, viewport_height) = dom.viewport();
        let page = (viewport_height - PAGE_OVERLAP).max(0.0);
        let target = match key {
            ScrollKey::Up => self.target - self.key_step,
            ScrollKey::Down => self.target + self.key_step,
            ScrollKey::PageUp => self.target - page,
            ScrollKey::PageDown => self.target + page,
            ScrollKey::Home => 0.0,
            ScrollKey::End => self.limit,
        };
        self.scroll_to(target);
    }

    /// Take over a native window scroll: the distance moved is added to the
    /// target and the window goes back to the top.
    pub fn absorb(&mut self, dom: &mut dyn Dom, window_y: f64) -> bool {
        if window_y == 0.0 {
            return false;
        }
        dom.scroll_window_to(0.0);
        self.scroll_to(self.target + window_y);
        true
    }

    /// Glide to an offset.
    pub fn scroll_to(&mut self, y: f64) {
        self.target = y.clamp(0.0, self.limit);
    }

    /// Move to an offset without smoothing.
    pub fn jump_to(&mut self, dom: &mut dyn Dom, y: f64) {
        self.target = y.clamp(0.0, self.limit);
        self.current = self.target;
        dom.set_style(self.container, Prop::Y, -self.current);
    }

    /// Advance one frame. Returns whether the offset moved.
    pub fn step(&mut self, dom: &mut dyn Dom) -> bool {
        if self.current == self.target {
            return false;
        }
        self.current += (self.target - self.current) * self.lerp;
        if (self.target - self.current).abs() < SNAP {
            self.current = self.target;
        }
        dom.set_style(self.container, Prop::Y, -self.current);
        true
    }

    pub fn destroy(&mut self, dom: &mut dyn Dom) {
        dom.clear_transform(self.container);
        if let Some(root) = self.root {
            dom.remove_class(root, SMOOTH_CLASS);
        }
        self.current = 0.0;
        self.target = 0.0;
    }
}
