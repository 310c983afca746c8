//! Splash overlay shown while the page boots.

use crate::{
    anim::{Ease, Repeat, Tween},
    config::ms,
    dom::{NodeId, Prop},
    page::{Deadline, Hook, PageCtx},
};

const OVERLAY_ID: &str = "loading";
const PULSE_SELECTOR: &str = "#loading .text-2xl";

#[derive(Debug)]
pub struct LoadingGate {
    overlay: Option<NodeId>,
    pulse: Vec<NodeId>,
    fading: bool,
    finished: bool,
}

impl LoadingGate {
    /// Start the pulse and schedule the exit.
    pub fn init(ctx: &mut PageCtx) -> Self {
        let overlay = ctx.dom.by_id(OVERLAY_ID);
        let pulse = ctx.dom.query_all(PULSE_SELECTOR);
        let cfg = &ctx.config.loading;
        for &node in &pulse {
            ctx.anim.add(
                Tween::to(node, Prop::Scale, cfg.pulse_scale, ms(cfg.pulse_ms))
                    .ease(Ease::Power2InOut)
                    .yoyo()
                    .repeat(Repeat::Forever),
                ctx.now,
            );
        }
        let at = ctx.now + cfg.delay();
        ctx.timers.schedule(Deadline::HideLoading, at);
        if overlay.is_none() {
            log::debug!("no #{} overlay on the page", OVERLAY_ID);
        }
        Self {
            overlay,
            pulse,
            fading: false,
            finished: false,
        }
    }

    /// The splash delay is over: fade the overlay out.
    ///
    /// Returns true if loading finished right away because there is no overlay.
    pub fn hide(&mut self, ctx: &mut PageCtx) -> bool {
        if self.fading || self.finished {
            return false;
        }
        match self.overlay {
            Some(overlay) => {
                self.fading = true;
                let fade = ctx.config.loading.fade();
                ctx.anim.add(
                    Tween::to(overlay, Prop::Opacity, 0.0, fade)
                        .ease(Ease::Power2Out)
                        .on_complete(Hook::LoadingFaded),
                    ctx.now,
                );
                false
            }
            None => self.finish(ctx),
        }
    }

    /// The fade-out completed. Returns true the first time only.
    pub fn on_faded(&mut self, ctx: &mut PageCtx) -> bool {
        if let Some(overlay) = self.overlay {
            ctx.dom.set_display(overlay, Some("none"));
        }
        self.finish(ctx)
    }

    fn finish(&mut self, ctx: &mut PageCtx) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        self.fading = false;
        for &node in &self.pulse {
            ctx.anim.kill(node);
        }
        ctx.loading = false;
        log::info!("loading finished");
        true
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
