//! The page controller.
//!
//! [`Page`] owns every component and the shared handles they operate on
//! ([`PageCtx`]). The platform layer feeds it two kinds of input, DOM events via
//! [`Page::dispatch`] and animation frames via [`Page::frame`], each stamped with
//! the page clock. Everything the page does is a function of that input sequence.
//!
//! # Lifecycle
//!
//! 1. [`Page::init`] runs the component initializers in page order: loading gate,
//!    navigation, hero scene, hero initial state, scroll adapter, interactions,
//!    contact form, scroll sections
//! 2. the platform attaches the listeners in [`EventBus`] and starts the frame loop
//! 3. the GPU backend is created asynchronously and handed over through
//!    [`Page::attach_scene`]
//! 4. on `beforeunload` the page tears down the momentum scroller and the renderer

use instant::Duration;

use crate::{
    anim::{Animator, TweenEngine},
    bus::{DomEvent, EventBus, EventKind, Listener, ListenerId, Propagation, Route, Target},
    config::{PageConfig, ms},
    contact::ContactForm,
    dom::Dom,
    hero::HeroIntro,
    interactions::Interactions,
    loading::LoadingGate,
    nav::Navigation,
    scene::{HeroScene, SceneBackend, SceneError},
    scroll::{EnterAction, ScrollAdapter, ScrollerProxy, TriggerRegistry, counter, sections},
    timer::Timers,
};

/// Completion hooks carried by tweens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hook {
    LoadingFaded,
}

/// What a pending deadline is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deadline {
    HideLoading,
    ResizeFlush,
    GalleryCooldown,
    FormSuccess,
    FormReset,
}

/// State shared by all components.
pub struct PageCtx {
    pub config: PageConfig,
    pub dom: Box<dyn Dom>,
    pub anim: Box<dyn Animator<Hook>>,
    pub timers: Timers<Deadline>,
    pub bus: EventBus,
    pub scroll: ScrollAdapter,
    /// Page clock of the event or frame being handled.
    pub now: Duration,
    /// True until the loading overlay has faded out.
    pub loading: bool,
}

impl PageCtx {
    pub fn new(config: PageConfig, dom: Box<dyn Dom>, now: Duration) -> Self {
        Self {
            config,
            dom,
            anim: Box::new(TweenEngine::new()),
            timers: Timers::new(),
            bus: EventBus::new(),
            scroll: ScrollAdapter::Native { y: 0.0 },
            now,
            loading: true,
        }
    }

    /// `now` shifted by a delay from the configuration.
    pub fn after(&self, millis: u64) -> Duration {
        self.now + ms(millis)
    }
}

pub struct Page {
    ctx: PageCtx,
    loading: LoadingGate,
    nav: Navigation,
    scene: HeroScene,
    hero: HeroIntro,
    triggers: TriggerRegistry,
    interactions: Interactions,
    contact: ContactForm,
    pending_resize: Option<(f64, f64)>,
    torn_down: bool,
}

impl Page {
    pub fn init(config: PageConfig, dom: Box<dyn Dom>, now: Duration) -> Self {
        let mut ctx = PageCtx::new(config, dom, now);
        let loading = LoadingGate::init(&mut ctx);
        let nav = Navigation::init(&mut ctx);
        let scene = HeroScene::init(&mut ctx);
        let hero = HeroIntro::init(&mut ctx);

        ctx.scroll = ScrollAdapter::init(&mut *ctx.dom, &ctx.config.scroll);
        ctx.bus.listen(Target::Window, EventKind::Scroll, Route::WindowScroll);
        ctx.bus.listen(Target::Window, EventKind::Resize, Route::WindowResize);
        ctx.bus.listen(Target::Window, EventKind::BeforeUnload, Route::Unload);
        if ctx.scroll.is_smooth() {
            ctx.bus
                .listen_active(Target::Window, EventKind::Wheel, Route::MomentumWheel);
            ctx.bus
                .listen_active(Target::Window, EventKind::KeyDown, Route::MomentumKey);
        }

        let interactions = Interactions::init(&mut ctx);
        let contact = ContactForm::init(&mut ctx);

        let mut triggers = TriggerRegistry::new(ctx.config.scroll.trigger_start);
        sections::register(&mut triggers, &mut ctx);

        let mut page = Self {
            ctx,
            loading,
            nav,
            scene,
            hero,
            triggers,
            interactions,
            contact,
            pending_resize: None,
            torn_down: false,
        };
        page.refresh_triggers();
        log::info!(
            "page initialized with {} listeners",
            page.ctx.bus.listeners().len()
        );
        page
    }

    /// Hand over the result of the asynchronous renderer setup.
    pub fn attach_scene(&mut self, backend: Result<Box<dyn SceneBackend>, SceneError>) {
        if self.torn_down {
            if let Ok(mut backend) = backend {
                backend.dispose();
            }
            return;
        }
        self.scene.attach(&mut self.ctx, backend);
    }

    /// Route a DOM event to its handler.
    pub fn dispatch(&mut self, id: ListenerId, event: &DomEvent, now: Duration) -> Propagation {
        if self.torn_down {
            return Propagation::Continue;
        }
        let Some(route) = self.ctx.bus.route(id) else {
            log::warn!("event for unknown listener {:?}", id);
            return Propagation::Continue;
        };
        self.ctx.now = now;
        let ctx = &mut self.ctx;
        match (route, *event) {
            (Route::WindowScroll, DomEvent::Scroll { y }) => {
                if ctx.scroll.on_native_scroll(&mut *ctx.dom, y) {
                    self.on_scroll_changed();
                }
                Propagation::Continue
            }
            (Route::WindowResize, DomEvent::Resize { width, height }) => {
                self.pending_resize = Some((width, height));
                let at = ctx.after(ctx.config.scene.resize_debounce_ms);
                ctx.timers.debounce(Deadline::ResizeFlush, at);
                Propagation::Continue
            }
            (Route::MomentumWheel, DomEvent::Wheel { delta_y }) => ctx.scroll.on_wheel(delta_y),
            (Route::MomentumKey, DomEvent::KeyDown { key }) => ctx.scroll.on_key(&*ctx.dom, key),
            (Route::Unload, _) => {
                self.teardown();
                Propagation::Continue
            }
            (Route::NavAnchor(link), DomEvent::Click) => self.nav.follow_anchor(ctx, link),
            (Route::MenuToggle, DomEvent::Click) => {
                self.nav.toggle_menu(ctx);
                Propagation::Continue
            }
            (Route::MenuLink(link), DomEvent::Click) => self.nav.follow_menu_link(ctx, link),
            (Route::Cta, DomEvent::Click) => {
                self.interactions.scroll_to_features(ctx);
                Propagation::Continue
            }
            (Route::MuteToggle, DomEvent::Click) => {
                self.interactions.toggle_mute(ctx);
                Propagation::Continue
            }
            (Route::CardEnter(card), DomEvent::MouseEnter) => {
                self.interactions.hover(ctx, card, true);
                Propagation::Continue
            }
            (Route::CardLeave(card), DomEvent::MouseLeave) => {
                self.interactions.hover(ctx, card, false);
                Propagation::Continue
            }
            (Route::GalleryWheel(wrapper), DomEvent::Wheel { delta_y }) => {
                self.interactions.gallery_wheel(ctx, wrapper, delta_y)
            }
            (Route::ContactSubmit, DomEvent::Submit) => self.contact.submit(ctx),
            (route, event) => {
                log::debug!("ignoring {:?} on {:?}", event, route);
                Propagation::Continue
            }
        }
    }

    /// One animation frame: deadlines, scroll smoothing, tweens, then the scene.
    pub fn frame(&mut self, now: Duration) {
        if self.torn_down {
            return;
        }
        self.ctx.now = now;
        for deadline in self.ctx.timers.due(now) {
            self.on_deadline(deadline);
        }
        if self.ctx.scroll.frame(&mut *self.ctx.dom) {
            self.on_scroll_changed();
        }
        for hook in self.ctx.anim.tick(now, &mut *self.ctx.dom) {
            match hook {
                Hook::LoadingFaded => {
                    if self.loading.on_faded(&mut self.ctx) {
                        self.hero.start(&mut self.ctx);
                    }
                }
            }
        }
        self.scene.frame(&self.ctx, now);
    }

    fn on_deadline(&mut self, deadline: Deadline) {
        let ctx = &mut self.ctx;
        match deadline {
            Deadline::HideLoading => {
                if self.loading.hide(ctx) {
                    self.hero.start(ctx);
                }
            }
            Deadline::ResizeFlush => {
                if let Some((width, height)) = self.pending_resize.take() {
                    self.scene.resize(ctx, width, height);
                    self.refresh_triggers();
                }
            }
            Deadline::GalleryCooldown => self.interactions.cooldown_elapsed(),
            Deadline::FormSuccess => self.contact.show_success(ctx),
            Deadline::FormReset => self.contact.reset(ctx),
        }
    }

    fn refresh_triggers(&mut self) {
        self.triggers
            .refresh(&mut *self.ctx.dom, &mut self.ctx.scroll);
        self.on_scroll_changed();
    }

    fn on_scroll_changed(&mut self) {
        let ctx = &mut self.ctx;
        self.nav.on_scroll(ctx);
        let scroll = ctx.scroll.scroll_top();
        let viewport = ctx.scroll.bounding_rect(&*ctx.dom);
        let actions = self
            .triggers
            .update(scroll, viewport, &mut *ctx.anim, &mut *ctx.dom, ctx.now);
        for action in actions {
            match action {
                EnterAction::Counters(nodes) => {
                    let duration = ms(ctx.config.scroll.counter_ms);
                    counter::start(&mut *ctx.anim, &mut *ctx.dom, &nodes, duration, ctx.now);
                }
            }
        }
    }

    /// Release the momentum scroller and the renderer. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.ctx.scroll.destroy(&mut *self.ctx.dom);
        self.scene.dispose();
        log::info!("page torn down");
    }

    /// Listeners the platform layer has not attached yet.
    pub fn take_unattached(&mut self) -> Vec<Listener> {
        self.ctx.bus.take_unattached()
    }

    pub fn is_loading(&self) -> bool {
        self.ctx.loading
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn ctx(&self) -> &PageCtx {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut PageCtx {
        &mut self.ctx
    }

    pub fn scene(&self) -> &HeroScene {
        &self.scene
    }

    pub fn triggers(&self) -> &TriggerRegistry {
        &self.triggers
    }

    pub fn bus(&self) -> &EventBus {
        &self.ctx.bus
    }
}
