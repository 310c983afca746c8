//! The DOM as seen by the page.
//!
//! Components never touch `web-sys` directly. They talk to a [`Dom`], which hands
//! out opaque [`NodeId`]s and accepts the handful of mutations the page performs.
//! `web::WebDom` is the browser implementation; tests use an in-memory one.
//!
//! Animated style properties go through [`Dom::apply`]. Transforms are composed
//! from several independently animated channels, which [`StyleState`] keeps track of
//! so that e.g. a hover scale does not clobber an entrance translation.

use crate::scroll::counter::CounterFormat;

/// Handle to an element owned by a [`Dom`] implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Axis-aligned box in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// An animatable property.
///
/// `Counter` is not a style: its value is rendered as the element's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    Opacity,
    /// Horizontal translation in px.
    X,
    /// Vertical translation in px.
    Y,
    /// Vertical translation in percent of the element's own height.
    YPercent,
    Scale,
    Counter(CounterFormat),
}

impl Prop {
    /// The value an untouched element has for this property.
    pub fn natural(self) -> f64 {
        match self {
            Prop::Opacity | Prop::Scale => 1.0,
            Prop::X | Prop::Y | Prop::YPercent | Prop::Counter(_) => 0.0,
        }
    }
}

/// Per-element cache of the animated style channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleState {
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Which CSS declaration a channel update has to rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleChange {
    Transform,
    Opacity,
    None,
}

impl StyleState {
    pub fn set(&mut self, prop: Prop, value: f64) -> StyleChange {
        match prop {
            Prop::Opacity => {
                self.opacity = value;
                return StyleChange::Opacity;
            }
            Prop::X => self.x = value,
            Prop::Y => self.y = value,
            Prop::YPercent => self.y_percent = value,
            Prop::Scale => self.scale = value,
            Prop::Counter(_) => return StyleChange::None,
        }
        StyleChange::Transform
    }

    /// CSS `transform` value for the current channels.
    pub fn transform(&self) -> String {
        let mut out = format!("translate({}px, {}px)", self.x, self.y);
        if self.y_percent != 0.0 {
            out.push_str(&format!(" translateY({}%)", self.y_percent));
        }
        out.push_str(&format!(" scale({})", self.scale));
        out
    }
}

/// The page's view of the document.
///
/// Lookups return `None`/empty for missing elements; every handler treats that as
/// "nothing to do".
pub trait Dom {
    fn by_id(&mut self, id: &str) -> Option<NodeId>;

    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;

    fn query_within(&mut self, parent: NodeId, selector: &str) -> Vec<NodeId>;

    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// Write one animated style channel.
    fn set_style(&mut self, node: NodeId, prop: Prop, value: f64);

    /// Remove any transform previously written to the element.
    fn clear_transform(&mut self, node: NodeId);

    fn has_inline_transform(&mut self, node: NodeId) -> bool;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn set_html(&mut self, node: NodeId, html: &str);

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Returns whether the class is present afterwards.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool;

    fn has_class(&mut self, node: NodeId, class: &str) -> bool;

    /// `None` clears the inline `display` so the stylesheet decides.
    fn set_display(&mut self, node: NodeId, display: Option<&str>);

    fn attr(&mut self, node: NodeId, name: &str) -> Option<String>;

    /// Bounding box relative to the viewport.
    fn rect(&mut self, node: NodeId) -> Option<Rect>;

    fn scroll_height(&mut self, node: NodeId) -> f64;

    /// `(innerWidth, innerHeight)`.
    fn viewport(&self) -> (f64, f64);

    fn device_pixel_ratio(&self) -> f64;

    /// True when the primary pointer is coarse (phones, tablets).
    fn is_touch_device(&self) -> bool;

    fn scroll_into_view(&mut self, node: NodeId);

    /// Current vertical scroll offset of the window (`scrollY`).
    fn window_scroll(&self) -> f64;

    /// Jump the window to a vertical offset.
    fn scroll_window_to(&mut self, y: f64);

    /// Smooth horizontal scroll of a scrollable element.
    fn scroll_by(&mut self, node: NodeId, left: f64);

    /// `None` if the element is not a media element.
    fn muted(&mut self, node: NodeId) -> Option<bool>;

    fn set_muted(&mut self, node: NodeId, muted: bool);

    fn reset_form(&mut self, node: NodeId);

    fn create_child(
        &mut self,
        parent: NodeId,
        tag: &str,
        class: Option<&str>,
        html: &str,
    ) -> Option<NodeId>;

    /// Sink for tweened values.
    fn apply(&mut self, node: NodeId, prop: Prop, value: f64) {
        match prop {
            Prop::Counter(format) => self.set_text(node, &format.display(value)),
            style => self.set_style(node, style, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_keeps_independent_channels() {
        let mut style = StyleState::default();
        assert_eq!(style.set(Prop::Y, 100.0), StyleChange::Transform);
        assert_eq!(style.set(Prop::Scale, 1.05), StyleChange::Transform);
        assert_eq!(style.transform(), "translate(0px, 100px) scale(1.05)");
        style.set(Prop::YPercent, -50.0);
        assert_eq!(
            style.transform(),
            "translate(0px, 100px) translateY(-50%) scale(1.05)"
        );
    }

    #[test]
    fn counter_is_not_a_style() {
        let mut style = StyleState::default();
        let change = style.set(Prop::Counter(CounterFormat::Integer), 3.0);
        assert_eq!(change, StyleChange::None);
        assert_eq!(style, StyleState::default());
    }
}
