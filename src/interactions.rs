//! Small interactive bits: the hero call to action, the video sound toggle,
//! feature card hovers and the horizontally scrolling gallery.

use crate::{
    anim::{Ease, Tween},
    bus::{EventKind, Propagation, Route, Target},
    config::ms,
    dom::{NodeId, Prop},
    page::{Deadline, PageCtx},
};

const SOUND_ON_HTML: &str = r#"<svg class="w-6 h-6 inline mr-2" fill="none" stroke="currentColor" viewBox="0 0 24 24">
    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5.586 15H4a1 1 0 01-1-1v-4a1 1 0 011-1h1.586l4.707-4.707C10.923 3.663 12 4.109 12 5v14c0 .891-1.077 1.337-1.707.707L5.586 15z" clip-rule="evenodd"></path>
    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M17 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2"></path>
</svg>
Mute Sound"#;

const MUTED_HTML: &str = r#"<svg class="w-6 h-6 inline mr-2" fill="none" stroke="currentColor" viewBox="0 0 24 24">
    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M15.536 8.464a5 5 0 010 7.072m2.828-9.9a9 9 0 010 14.142M8.586 9.586A2 2 0 0011.414 12.586l.586-.586z"></path>
</svg>
Toggle Sound"#;

#[derive(Debug, Default)]
pub struct Interactions {
    video: Option<NodeId>,
    toggle: Option<NodeId>,
    cooling: bool,
}

impl Interactions {
    pub fn init(ctx: &mut PageCtx) -> Self {
        if let Some(cta) = ctx.dom.query(".cta-button") {
            ctx.bus.listen(Target::Node(cta), EventKind::Click, Route::Cta);
        }

        let toggle = ctx.dom.by_id("video-toggle");
        let video = ctx.dom.by_id("bg-video");
        if let (Some(toggle), Some(_)) = (toggle, video) {
            ctx.bus
                .listen(Target::Node(toggle), EventKind::Click, Route::MuteToggle);
        }

        for card in ctx.dom.query_all(".feature-card") {
            ctx.bus
                .listen(Target::Node(card), EventKind::MouseEnter, Route::CardEnter(card));
            ctx.bus
                .listen(Target::Node(card), EventKind::MouseLeave, Route::CardLeave(card));
        }

        if let Some(wrapper) = ctx.dom.query(".horizontal-scroll-wrapper") {
            ctx.bus.listen_active(
                Target::Node(wrapper),
                EventKind::Wheel,
                Route::GalleryWheel(wrapper),
            );
        }

        Self {
            video,
            toggle,
            cooling: false,
        }
    }

    pub fn scroll_to_features(&mut self, ctx: &mut PageCtx) {
        if let Some(features) = ctx.dom.by_id("features") {
            ctx.scroll.scroll_to_node(&mut *ctx.dom, features);
        }
    }

    /// Flip the background video's sound and relabel the toggle.
    pub fn toggle_mute(&mut self, ctx: &mut PageCtx) {
        let (Some(video), Some(toggle)) = (self.video, self.toggle) else {
            return;
        };
        let Some(muted) = ctx.dom.muted(video) else {
            log::warn!("#bg-video is not a media element");
            return;
        };
        ctx.dom.set_muted(video, !muted);
        // the label names what the button does next
        let html = if muted { SOUND_ON_HTML } else { MUTED_HTML };
        ctx.dom.set_html(toggle, html);
    }

    pub fn hover(&mut self, ctx: &mut PageCtx, card: NodeId, entering: bool) {
        let cfg = &ctx.config.interactions;
        let scale = if entering { cfg.hover_scale } else { 1.0 };
        ctx.anim.add(
            Tween::to(card, Prop::Scale, scale, ms(cfg.hover_ms)).ease(Ease::Power2Out),
            ctx.now,
        );
    }

    /// Turn vertical wheel input into a horizontal glide, at most once per cooldown.
    pub fn gallery_wheel(&mut self, ctx: &mut PageCtx, wrapper: NodeId, delta_y: f64) -> Propagation {
        if self.cooling {
            return Propagation::Continue;
        }
        self.cooling = true;
        let cfg = &ctx.config.interactions;
        ctx.dom.scroll_by(wrapper, delta_y * cfg.gallery_wheel_factor);
        let at = ctx.after(cfg.gallery_cooldown_ms);
        ctx.timers.schedule(Deadline::GalleryCooldown, at);
        Propagation::PreventDefault
    }

    pub fn cooldown_elapsed(&mut self) {
        self.cooling = false;
    }

    pub fn is_cooling(&self) -> bool {
        self.cooling
    }
}
