//! Scrolling: momentum scrolling, the bridge the trigger registry reads the
//! position through, and the scroll-triggered section animations.

pub mod adapter;
pub mod counter;
pub mod momentum;
pub mod sections;
pub mod trigger;

pub use adapter::{PinType, ScrollAdapter, ScrollerProxy};
pub use momentum::{MomentumScroll, ScrollError};
pub use trigger::{EnterAction, Entrance, TriggerRegistry};
