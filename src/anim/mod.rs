//! Property animation.
//!
//! A small tween engine standing in for a JavaScript tweening library:
//!
//! - [`ease`] contains the easing curves
//! - [`tween`] describes one interpolated property (duration, delay, repeat, yoyo, hook)
//! - [`timeline`] places tweens relative to each other and staggers groups
//! - [`engine`] defines the [`Animator`] interface and the frame-driven [`TweenEngine`]
//!
//! Nothing here owns a clock. Callers pass the page time to [`Animator::add`] and
//! [`Animator::tick`], which keeps every animation deterministic under test.

pub mod ease;
pub mod engine;
pub mod timeline;
pub mod tween;

pub use ease::Ease;
pub use engine::{Animator, TweenEngine, TweenId};
pub use timeline::{Position, Timeline, stagger};
pub use tween::{Phase, Repeat, Tween};
