//! Typed listener registry.
//!
//! Components declare which DOM events they care about by registering a
//! [`Listener`]: a target, an event kind and the [`Route`] that tells the page
//! which handler owns it. The platform layer attaches every registered listener
//! and reports events back as `(ListenerId, DomEvent)`. Listeners registered while
//! handling an event (the lazily built mobile menu) are picked up through
//! [`EventBus::take_unattached`].

use crate::dom::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Window,
    Node(NodeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Scroll,
    Resize,
    Click,
    Wheel,
    MouseEnter,
    MouseLeave,
    Submit,
    KeyDown,
    BeforeUnload,
}

impl EventKind {
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::Click => "click",
            EventKind::Wheel => "wheel",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Submit => "submit",
            EventKind::KeyDown => "keydown",
            EventKind::BeforeUnload => "beforeunload",
        }
    }
}

/// Keys that scroll the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

impl ScrollKey {
    /// Map a `KeyboardEvent.key` value. Space pages down, Shift+Space up.
    pub fn from_key(key: &str, shift: bool) -> Option<Self> {
        match key {
            "ArrowUp" => Some(ScrollKey::Up),
            "ArrowDown" => Some(ScrollKey::Down),
            "PageUp" => Some(ScrollKey::PageUp),
            "PageDown" => Some(ScrollKey::PageDown),
            " " if shift => Some(ScrollKey::PageUp),
            " " => Some(ScrollKey::PageDown),
            "Home" => Some(ScrollKey::Home),
            "End" => Some(ScrollKey::End),
            _ => None,
        }
    }
}

/// The payload of a DOM event, reduced to what handlers read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DomEvent {
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    Click,
    Wheel { delta_y: f64 },
    MouseEnter,
    MouseLeave,
    Submit,
    /// `None` for keys that do not scroll, or when a form field has focus.
    KeyDown { key: Option<ScrollKey> },
    BeforeUnload,
}

/// What the platform layer should do with the native event after dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    PreventDefault,
}

/// Which handler a listener belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    WindowScroll,
    WindowResize,
    MomentumWheel,
    MomentumKey,
    Unload,
    NavAnchor(NodeId),
    MenuToggle,
    MenuLink(NodeId),
    Cta,
    MuteToggle,
    CardEnter(NodeId),
    CardLeave(NodeId),
    GalleryWheel(NodeId),
    ContactSubmit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Listener {
    pub id: ListenerId,
    pub target: Target,
    pub kind: EventKind,
    pub route: Route,
    /// Passive listeners cannot prevent default; wheel handlers that do must opt out.
    pub passive: bool,
}

#[derive(Debug, Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
    attached: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, target: Target, kind: EventKind, route: Route) -> ListenerId {
        let passive = !matches!(kind, EventKind::Click | EventKind::Submit);
        self.register(target, kind, route, passive)
    }

    /// Register a listener that may call `preventDefault`.
    pub fn listen_active(&mut self, target: Target, kind: EventKind, route: Route) -> ListenerId {
        self.register(target, kind, route, false)
    }

    fn register(&mut self, target: Target, kind: EventKind, route: Route, passive: bool) -> ListenerId {
        let id = ListenerId(self.listeners.len());
        self.listeners.push(Listener {
            id,
            target,
            kind,
            route,
            passive,
        });
        id
    }

    pub fn route(&self, id: ListenerId) -> Option<Route> {
        self.listeners.get(id.0).map(|l| l.route)
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Find the listener registered for a route, mostly useful to drive a page by hand.
    pub fn find(&self, route: Route) -> Option<ListenerId> {
        self.listeners.iter().find(|l| l.route == route).map(|l| l.id)
    }

    /// Listeners registered since the last call.
    pub fn take_unattached(&mut self) -> Vec<Listener> {
        let fresh = self.listeners[self.attached..].to_vec();
        self.attached = self.listeners.len();
        fresh
    }
}
