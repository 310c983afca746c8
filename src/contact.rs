//! Contact form with a simulated submission.
//!
//! Nothing is sent anywhere. Submitting presses the button, swaps the button
//! label for a success message after a short delay and puts everything back a
//! few seconds later.

use instant::Duration;

use crate::{
    anim::{Ease, Repeat, Tween},
    bus::{EventKind, Propagation, Route, Target},
    dom::{NodeId, Prop},
    page::{Deadline, PageCtx},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    ShowingSuccess,
}

#[derive(Debug)]
pub struct ContactForm {
    form: Option<NodeId>,
    button: Option<NodeId>,
    text: Option<NodeId>,
    success: Option<NodeId>,
    phase: FormPhase,
}

impl ContactForm {
    pub fn init(ctx: &mut PageCtx) -> Self {
        let form = ctx.dom.by_id("contact-form");
        if let Some(form) = form {
            ctx.bus
                .listen(Target::Node(form), EventKind::Submit, Route::ContactSubmit);
        }
        Self {
            form,
            button: ctx.dom.by_id("submit-btn"),
            text: ctx.dom.by_id("submit-text"),
            success: ctx.dom.by_id("submit-success"),
            phase: FormPhase::Idle,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// A submission while the previous one is still cycling is swallowed.
    pub fn submit(&mut self, ctx: &mut PageCtx) -> Propagation {
        if self.phase != FormPhase::Idle {
            log::debug!("contact form busy, ignoring submit");
            return Propagation::PreventDefault;
        }
        self.phase = FormPhase::Submitting;
        if let Some(button) = self.button {
            ctx.anim.add(
                Tween::to(button, Prop::Scale, 0.95, Duration::from_millis(100))
                    .yoyo()
                    .repeat(Repeat::Times(1)),
                ctx.now,
            );
        }
        let at = ctx.after(ctx.config.form.success_delay_ms);
        ctx.timers.schedule(Deadline::FormSuccess, at);
        Propagation::PreventDefault
    }

    pub fn show_success(&mut self, ctx: &mut PageCtx) {
        if self.phase != FormPhase::Submitting {
            return;
        }
        self.phase = FormPhase::ShowingSuccess;
        if let Some(text) = self.text {
            ctx.dom.add_class(text, "hidden");
        }
        if let Some(success) = self.success {
            ctx.dom.remove_class(success, "hidden");
            let duration = Duration::from_millis(500);
            for (prop, from) in [(Prop::Scale, 0.8), (Prop::Opacity, 0.0)] {
                ctx.anim.add(
                    Tween::to(success, prop, prop.natural(), duration)
                        .from(from)
                        .ease(Ease::BACK_OUT),
                    ctx.now,
                );
            }
        }
        let at = ctx.after(ctx.config.form.reset_delay_ms);
        ctx.timers.schedule(Deadline::FormReset, at);
    }

    pub fn reset(&mut self, ctx: &mut PageCtx) {
        if self.phase != FormPhase::ShowingSuccess {
            return;
        }
        self.phase = FormPhase::Idle;
        if let Some(text) = self.text {
            ctx.dom.remove_class(text, "hidden");
        }
        if let Some(success) = self.success {
            ctx.dom.add_class(success, "hidden");
        }
        if let Some(form) = self.form {
            ctx.dom.reset_form(form);
        }
    }
}
