//! hyperdrive
//!
//! Runtime for the HyperDrive EV landing page, compiled to WebAssembly. It owns
//! everything on the page that moves: the loading splash, the hero entrance,
//! momentum scrolling with scroll-triggered section reveals, the rotating 3D car
//! in the hero and the small interactions (mute toggle, gallery, contact form).
//!
//! The page logic is platform independent and driven by `(event, time)` input,
//! so it runs natively under test against an in-memory DOM.
//!
//! High-level modules
//! - `config`: every delay, duration and threshold, loadable from JSON
//! - `anim`: easing curves, tweens, timelines and the frame-driven tween engine
//! - `timer`: one-shot deadlines polled per frame
//! - `dom`: the DOM interface the page is written against
//! - `bus`: typed listener registry between the page and the platform
//! - `page`: the controller owning all components
//! - `loading`, `nav`, `hero`, `interactions`, `contact`: page components
//! - `scroll`: momentum scrolling, scroll triggers and the specs-section counters
//! - `scene`: the hero car scene and its wgpu renderer
//! - `web`: browser bindings and entry point (wasm32 only)
//! - `preview`: desktop window rendering the hero scene (native only)
//!

pub mod anim;
pub mod bus;
pub mod config;
pub mod contact;
pub mod dom;
pub mod hero;
pub mod interactions;
pub mod loading;
pub mod nav;
pub mod page;
pub mod scene;
pub mod scroll;
pub mod timer;

#[cfg(not(target_arch = "wasm32"))]
pub mod preview;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::PageConfig;
pub use page::Page;
