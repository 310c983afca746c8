//! Browser glue: the `web-sys` [`Dom`], the listener binder and the frame loop.
//!
//! The page itself never sees a `web_sys` type. [`WebDom`] interns every element
//! it hands out in a registry shared with the binder, which is how listeners
//! registered on a [`NodeId`] get attached to the real element.

use std::{cell::RefCell, rc::Rc};

use anyhow::Context as _;
use instant::Instant;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlCanvasElement, HtmlElement,
    HtmlFormElement, HtmlMediaElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, WheelEvent, Window,
};

use crate::{
    bus::{DomEvent, EventKind, Listener, Propagation, ScrollKey, Target},
    config::PageConfig,
    dom::{Dom, NodeId, Prop, Rect, StyleChange, StyleState},
    page::Page,
    scene::{GpuRenderer, SceneBackend, SceneError, SceneVisibility, physical_size},
};

const CONFIG_ATTRIBUTE: &str = "data-hyperdrive-config";

type Registry = Rc<RefCell<Vec<Element>>>;

pub struct WebDom {
    window: Window,
    document: Document,
    nodes: Registry,
    styles: Vec<StyleState>,
}

impl WebDom {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            nodes: Rc::new(RefCell::new(Vec::new())),
            styles: Vec::new(),
        }
    }

    fn registry(&self) -> Registry {
        self.nodes.clone()
    }

    fn intern(&mut self, element: Element) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(index) = nodes.iter().position(|known| *known == element) {
            return NodeId(index);
        }
        nodes.push(element);
        self.styles.push(StyleState::default());
        NodeId(nodes.len() - 1)
    }

    fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node.0).cloned()
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&mut self, list: Result<web_sys::NodeList, JsValue>, selector: &str) -> Vec<NodeId> {
        let Ok(list) = list else {
            log::warn!("invalid selector {:?}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }

    fn set_css(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.html(node) {
            if let Err(e) = element.style().set_property(name, value) {
                log::warn!("could not set {}: {:?}", name, e);
            }
        }
    }

    fn remove_css(&self, node: NodeId, name: &str) {
        if let Some(element) = self.html(node) {
            let _ = element.style().remove_property(name);
        }
    }
}

impl Dom for WebDom {
    fn by_id(&mut self, id: &str) -> Option<NodeId> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.intern(element))
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let list = self.document.query_selector_all(selector);
        self.collect(list, selector)
    }

    fn query_within(&mut self, parent: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parent) = self.element(parent) else {
            return Vec::new();
        };
        let list = parent.query_selector_all(selector);
        self.collect(list, selector)
    }

    fn set_style(&mut self, node: NodeId, prop: Prop, value: f64) {
        let Some(style) = self.styles.get_mut(node.0) else {
            return;
        };
        match style.set(prop, value) {
            StyleChange::Transform => {
                let transform = style.transform();
                self.set_css(node, "transform", &transform);
            }
            StyleChange::Opacity => self.set_css(node, "opacity", &value.to_string()),
            StyleChange::None => {}
        }
    }

    fn clear_transform(&mut self, node: NodeId) {
        if let Some(style) = self.styles.get_mut(node.0) {
            let opacity = style.opacity;
            *style = StyleState {
                opacity,
                ..StyleState::default()
            };
        }
        self.remove_css(node, "transform");
    }

    fn has_inline_transform(&mut self, node: NodeId) -> bool {
        self.html(node)
            .and_then(|element| element.style().get_property_value("transform").ok())
            .is_some_and(|value| !value.is_empty())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, node: NodeId, html: &str) {
        if let Some(element) = self.element(node) {
            element.set_inner_html(html);
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .and_then(|element| element.class_list().toggle(class).ok())
            .unwrap_or(false)
    }

    fn has_class(&mut self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_display(&mut self, node: NodeId, display: Option<&str>) {
        match display {
            Some(display) => self.set_css(node, "display", display),
            None => self.remove_css(node, "display"),
        }
    }

    fn attr(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn rect(&mut self, node: NodeId) -> Option<Rect> {
        let rect = self.element(node)?.get_bounding_client_rect();
        Some(Rect::new(rect.top(), rect.left(), rect.width(), rect.height()))
    }

    fn scroll_height(&mut self, node: NodeId) -> f64 {
        self.element(node)
            .map(|element| element.scroll_height() as f64)
            .unwrap_or(0.0)
    }

    fn viewport(&self) -> (f64, f64) {
        let read = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        (read(self.window.inner_width()), read(self.window.inner_height()))
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn is_touch_device(&self) -> bool {
        self.window
            .match_media("(pointer: coarse)")
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        if let Some(element) = self.element(node) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn window_scroll(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_window_to(&mut self, y: f64) {
        let options = ScrollToOptions::new();
        options.set_top(y);
        options.set_behavior(ScrollBehavior::Instant);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_by(&mut self, node: NodeId, left: f64) {
        if let Some(element) = self.element(node) {
            let options = ScrollToOptions::new();
            options.set_left(left);
            options.set_behavior(ScrollBehavior::Smooth);
            element.scroll_by_with_scroll_to_options(&options);
        }
    }

    fn muted(&mut self, node: NodeId) -> Option<bool> {
        let media = self.element(node)?.dyn_into::<HtmlMediaElement>().ok()?;
        Some(media.muted())
    }

    fn set_muted(&mut self, node: NodeId, muted: bool) {
        if let Some(media) = self
            .element(node)
            .and_then(|element| element.dyn_into::<HtmlMediaElement>().ok())
        {
            media.set_muted(muted);
        }
    }

    fn reset_form(&mut self, node: NodeId) {
        if let Some(form) = self
            .element(node)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn create_child(
        &mut self,
        parent: NodeId,
        tag: &str,
        class: Option<&str>,
        html: &str,
    ) -> Option<NodeId> {
        let parent = self.element(parent)?;
        let child = self.document.create_element(tag).ok()?;
        if let Some(class) = class {
            child.set_class_name(class);
        }
        if !html.is_empty() {
            child.set_inner_html(html);
        }
        parent.append_child(&child).ok()?;
        Some(self.intern(child))
    }
}

struct WebApp {
    page: Page,
    window: Window,
    nodes: Registry,
    started: Instant,
}

fn dom_event(window: &Window, kind: EventKind, event: &web_sys::Event) -> DomEvent {
    match kind {
        EventKind::Scroll => DomEvent::Scroll {
            y: window.scroll_y().unwrap_or(0.0),
        },
        EventKind::Resize => {
            let read = |value: Result<JsValue, JsValue>| {
                value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
            };
            DomEvent::Resize {
                width: read(window.inner_width()),
                height: read(window.inner_height()),
            }
        }
        EventKind::Wheel => DomEvent::Wheel {
            delta_y: event
                .dyn_ref::<WheelEvent>()
                .map(|wheel| wheel.delta_y())
                .unwrap_or(0.0),
        },
        EventKind::Click => DomEvent::Click,
        EventKind::MouseEnter => DomEvent::MouseEnter,
        EventKind::MouseLeave => DomEvent::MouseLeave,
        EventKind::Submit => DomEvent::Submit,
        EventKind::KeyDown => DomEvent::KeyDown {
            key: event
                .dyn_ref::<KeyboardEvent>()
                .filter(|_| !typing_into_field(event))
                .and_then(|key| ScrollKey::from_key(&key.key(), key.shift_key())),
        },
        EventKind::BeforeUnload => DomEvent::BeforeUnload,
    }
}

/// Keys typed into the contact form must keep their default action.
fn typing_into_field(event: &web_sys::Event) -> bool {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
        || element.has_attribute("contenteditable")
}

fn attach(app: &Rc<RefCell<WebApp>>, listener: Listener) {
    let target: EventTarget = {
        let app_ref = app.borrow();
        match listener.target {
            Target::Window => app_ref.window.clone().into(),
            Target::Node(node) => match app_ref.nodes.borrow().get(node.0) {
                Some(element) => element.clone().into(),
                None => {
                    log::warn!("listener {:?} targets an unknown node", listener.id);
                    return;
                }
            },
        }
    };

    let handler = {
        let app = app.clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            handle(&app, listener, &event);
        })
    };
    let options = AddEventListenerOptions::new();
    options.set_passive(listener.passive);
    if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
        listener.kind.dom_name(),
        handler.as_ref().unchecked_ref(),
        &options,
    ) {
        log::warn!("could not attach {} listener: {:?}", listener.kind.dom_name(), e);
    }
    // listeners live as long as the page
    handler.forget();
}

fn handle(app: &Rc<RefCell<WebApp>>, listener: Listener, event: &web_sys::Event) {
    let fresh = {
        // an event raised synchronously by one of our own DOM writes is dropped
        let Ok(mut app) = app.try_borrow_mut() else {
            return;
        };
        let app = &mut *app;
        let now = app.started.elapsed();
        let dom_event = dom_event(&app.window, listener.kind, event);
        if app.page.dispatch(listener.id, &dom_event, now) == Propagation::PreventDefault {
            event.prevent_default();
        }
        app.page.take_unattached()
    };
    for listener in fresh {
        attach(app, listener);
    }
}

fn start_frame_loop(app: Rc<RefCell<WebApp>>) {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let request = |window: &Window, callback: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>| {
        if let Some(cb) = callback.borrow().as_ref() {
            if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        }
    };

    *callback.borrow_mut() = Some({
        let app = app.clone();
        let callback = callback.clone();
        Closure::wrap(Box::new(move || {
            let window = {
                let Ok(mut app) = app.try_borrow_mut() else {
                    return;
                };
                let now = app.started.elapsed();
                app.page.frame(now);
                if app.page.is_torn_down() {
                    return;
                }
                app.window.clone()
            };
            request(&window, &callback);
        }) as Box<dyn FnMut()>)
    });

    let window = app.borrow().window.clone();
    request(&window, &callback);
}

/// Create the renderer on the hero canvas and hand it to the page once ready.
fn start_renderer(app: Rc<RefCell<WebApp>>) {
    let setup = {
        let app_ref = app.borrow();
        let page = &app_ref.page;
        if page.scene().visibility() != SceneVisibility::Pending {
            return;
        }
        let canvas = page
            .scene()
            .canvas()
            .and_then(|node| app_ref.nodes.borrow().get(node.0).cloned())
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok());
        let ctx = page.ctx();
        let (width, height) = ctx.dom.viewport();
        let (w, h) = physical_size(
            &ctx.config.scene,
            ctx.dom.device_pixel_ratio(),
            width,
            height,
        );
        canvas.map(|canvas| {
            canvas.set_width(w);
            canvas.set_height(h);
            (canvas, w, h, page.scene().state().clone())
        })
    };

    let Some((canvas, width, height, state)) = setup else {
        app.borrow_mut()
            .page
            .attach_scene(Err(SceneError::Surface("hero canvas unavailable".into())));
        return;
    };

    wasm_bindgen_futures::spawn_local(async move {
        let result = GpuRenderer::new(wgpu::SurfaceTarget::Canvas(canvas), width, height, &state)
            .await
            .map(|renderer| Box::new(renderer) as Box<dyn SceneBackend>);
        match app.try_borrow_mut() {
            Ok(mut app) => app.page.attach_scene(result),
            Err(_) => log::error!("page busy, dropping renderer"),
        }
    });
}

fn load_config(document: &Document) -> PageConfig {
    let Some(raw) = document
        .body()
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE))
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{:#}, using defaults", e);
            PageConfig::default()
        }
    }
}

fn boot(window: Window, document: Document) {
    let config = load_config(&document);
    let dom = WebDom::new(window.clone(), document);
    let nodes = dom.registry();
    let started = Instant::now();
    let page = Page::init(config, Box::new(dom), started.elapsed());
    let app = Rc::new(RefCell::new(WebApp {
        page,
        window,
        nodes,
        started,
    }));

    let listeners = app.borrow_mut().page.take_unattached();
    for listener in listeners {
        attach(&app, listener);
    }
    start_renderer(app.clone());
    start_frame_loop(app);
}

fn run() -> anyhow::Result<()> {
    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;

    if document.ready_state() != "loading" {
        boot(window, document);
        return Ok(());
    }

    let ready = {
        let window = window.clone();
        let document = document.clone();
        Closure::<dyn FnMut()>::once(move || boot(window, document))
    };
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            ready.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))
        .context("could not wait for DOMContentLoaded")?;
    ready.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // a second init (hot reload) keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);
    run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
