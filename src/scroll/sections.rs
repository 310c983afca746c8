//! The page's scroll-driven sections.

use crate::{
    anim::Ease,
    config::ms,
    dom::Prop,
    page::PageCtx,
    scroll::trigger::{EnterAction, Entrance, TriggerRegistry},
};

struct SectionSpec {
    section: &'static str,
    elements: &'static str,
    from: &'static [(Prop, f64)],
    duration_ms: u64,
    stagger_ms: u64,
    ease: Ease,
}

const SECTIONS: [SectionSpec; 4] = [
    SectionSpec {
        section: "features",
        elements: ".feature-card",
        from: &[(Prop::Y, 100.0), (Prop::Opacity, 0.0)],
        duration_ms: 1000,
        stagger_ms: 200,
        ease: Ease::Power2Out,
    },
    SectionSpec {
        section: "gallery",
        elements: ".gallery-item",
        from: &[(Prop::X, 100.0), (Prop::Opacity, 0.0)],
        duration_ms: 1000,
        stagger_ms: 300,
        ease: Ease::Power2Out,
    },
    SectionSpec {
        section: "specs",
        elements: ".spec-card",
        from: &[(Prop::Scale, 0.8), (Prop::Opacity, 0.0)],
        duration_ms: 800,
        stagger_ms: 100,
        ease: Ease::BACK_OUT,
    },
    SectionSpec {
        section: "contact",
        elements: "#contact-form",
        from: &[(Prop::Y, 80.0), (Prop::Opacity, 0.0)],
        duration_ms: 1000,
        stagger_ms: 0,
        ease: Ease::Power2Out,
    },
];

/// Declare every section's entrance plus the hero parallax.
///
/// Sections or element groups missing from the page are skipped.
pub fn register(registry: &mut TriggerRegistry, ctx: &mut PageCtx) {
    for spec in &SECTIONS {
        let Some(section) = ctx.dom.by_id(spec.section) else {
            log::debug!("section #{} not on the page", spec.section);
            continue;
        };
        let targets = ctx.dom.query_all(spec.elements);
        if targets.is_empty() {
            continue;
        }
        let action = match spec.section {
            "specs" => {
                let counters = ctx.dom.query_all(".spec-number");
                (!counters.is_empty()).then_some(EnterAction::Counters(counters))
            }
            _ => None,
        };
        let entrance = Entrance {
            targets,
            from: spec.from.to_vec(),
            duration: ms(spec.duration_ms),
            stagger: ms(spec.stagger_ms),
            ease: spec.ease,
        };
        registry.reveal(section, entrance, action, &mut *ctx.anim, &mut *ctx.dom);
    }

    if let (Some(hero), Some(particles)) = (ctx.dom.by_id("hero"), ctx.dom.by_id("particles")) {
        registry.scrub(hero, particles, Prop::YPercent, 0.0, -50.0);
    }
}
