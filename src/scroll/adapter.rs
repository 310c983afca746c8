use crate::{
    bus::{Propagation, ScrollKey},
    config::ScrollConfig,
    dom::{Dom, NodeId, Rect},
    scroll::momentum::MomentumScroll,
};

/// How pinned elements have to be positioned inside the scroller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinType {
    Transform,
    Fixed,
}

/// The hooks the trigger registry uses to read and drive the scroll position.
pub trait ScrollerProxy {
    fn scroll_top(&self) -> f64;

    fn set_scroll_top(&mut self, dom: &mut dyn Dom, y: f64);

    fn bounding_rect(&self, dom: &dyn Dom) -> Rect;

    fn pin_type(&self) -> PinType;

    /// Called whenever the registry recomputes layout.
    fn refresh(&mut self, dom: &mut dyn Dom);
}

/// Scroll position source for the page: momentum scrolling when it could be set
/// up, the browser's own scrolling otherwise.
#[derive(Debug)]
pub enum ScrollAdapter {
    Momentum { engine: MomentumScroll, pin: PinType },
    Native { y: f64 },
}

impl ScrollAdapter {
    pub fn init(dom: &mut dyn Dom, config: &ScrollConfig) -> Self {
        match MomentumScroll::new(dom, config) {
            Ok(engine) => {
                let pin = if dom.has_inline_transform(engine.container()) {
                    PinType::Transform
                } else {
                    PinType::Fixed
                };
                log::info!("momentum scrolling enabled ({:?} pinning)", pin);
                ScrollAdapter::Momentum { engine, pin }
            }
            Err(e) => {
                log::warn!("{}, using native scroll", e);
                ScrollAdapter::Native {
                    y: dom.window_scroll(),
                }
            }
        }
    }

    pub fn is_smooth(&self) -> bool {
        matches!(self, ScrollAdapter::Momentum { .. })
    }

    /// A window scroll event. Native mode takes the offset as is; the momentum
    /// scroller absorbs it and glides there on the following frames. Returns
    /// whether the offset changed right away.
    pub fn on_native_scroll(&mut self, dom: &mut dyn Dom, y: f64) -> bool {
        match self {
            ScrollAdapter::Momentum { engine, .. } => {
                engine.absorb(dom, y);
                false
            }
            ScrollAdapter::Native { y: current } if *current != y => {
                *current = y;
                true
            }
            ScrollAdapter::Native { .. } => false,
        }
    }

    pub fn on_key(&mut self, dom: &dyn Dom, key: Option<ScrollKey>) -> Propagation {
        match (self, key) {
            (ScrollAdapter::Momentum { engine, .. }, Some(key)) => {
                engine.on_key(dom, key);
                Propagation::PreventDefault
            }
            _ => Propagation::Continue,
        }
    }

    pub fn on_wheel(&mut self, delta_y: f64) -> Propagation {
        match self {
            ScrollAdapter::Momentum { engine, .. } => {
                engine.on_wheel(delta_y);
                Propagation::PreventDefault
            }
            ScrollAdapter::Native { .. } => Propagation::Continue,
        }
    }

    /// Advance smoothing by one frame. Returns whether the offset moved.
    pub fn frame(&mut self, dom: &mut dyn Dom) -> bool {
        match self {
            ScrollAdapter::Momentum { engine, .. } => engine.step(dom),
            ScrollAdapter::Native { .. } => false,
        }
    }

    /// Smoothly bring an element to the top of the viewport.
    pub fn scroll_to_node(&mut self, dom: &mut dyn Dom, node: NodeId) {
        match self {
            ScrollAdapter::Momentum { engine, .. } => {
                if let Some(rect) = dom.rect(node) {
                    engine.scroll_to(rect.top + engine.offset());
                }
            }
            ScrollAdapter::Native { .. } => dom.scroll_into_view(node),
        }
    }

    /// Release the container and hand scrolling back to the browser.
    pub fn destroy(&mut self, dom: &mut dyn Dom) {
        if let ScrollAdapter::Momentum { engine, .. } = self {
            engine.destroy(dom);
            *self = ScrollAdapter::Native {
                y: dom.window_scroll(),
            };
        }
    }
}

impl ScrollerProxy for ScrollAdapter {
    fn scroll_top(&self) -> f64 {
        match self {
            ScrollAdapter::Momentum { engine, .. } => engine.offset(),
            ScrollAdapter::Native { y } => *y,
        }
    }

    fn set_scroll_top(&mut self, dom: &mut dyn Dom, y: f64) {
        match self {
            ScrollAdapter::Momentum { engine, .. } => engine.jump_to(dom, y),
            ScrollAdapter::Native { y: current } => {
                dom.scroll_window_to(y);
                *current = y;
            }
        }
    }

    fn bounding_rect(&self, dom: &dyn Dom) -> Rect {
        let (width, height) = dom.viewport();
        Rect::new(0.0, 0.0, width, height)
    }

    fn pin_type(&self) -> PinType {
        match self {
            ScrollAdapter::Momentum { pin, .. } => *pin,
            ScrollAdapter::Native { .. } => PinType::Fixed,
        }
    }

    fn refresh(&mut self, dom: &mut dyn Dom) {
        if let ScrollAdapter::Momentum { engine, .. } = self {
            engine.update(dom);
        }
    }
}
