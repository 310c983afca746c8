use std::{cell::RefCell, collections::HashMap, rc::Rc};

use hyperdrive::{
    Page, PageConfig,
    bus::{DomEvent, ListenerId, Propagation, Route},
    dom::{Dom, NodeId, Prop, Rect, StyleChange, StyleState},
    scene::{SceneBackend, SceneError, SceneState, transform::Transform},
};
use instant::Duration;

pub const FRAME: Duration = Duration::from_millis(16);

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Run a frame every 16 ms after `from`, the last one exactly at `to`.
pub fn frames(page: &mut Page, from: Duration, to: Duration) -> Duration {
    let mut now = from;
    while now < to {
        now = (now + FRAME).min(to);
        page.frame(now);
    }
    now
}

pub fn native_scroll() -> PageConfig {
    let mut config = PageConfig::default();
    config.scroll.smooth = false;
    config
}

#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,
    pub parent: Option<NodeId>,
    pub detached: bool,
    pub text: String,
    pub html: String,
    pub display: Option<String>,
    pub style: StyleState,
    /// Last `transform` written, `None` if never written or cleared.
    pub transform: Option<String>,
    pub opacity: Option<f64>,
    /// Layout box in document coordinates.
    pub layout: Rect,
    pub scroll_height: f64,
    pub scroll_left: f64,
    pub muted: Option<bool>,
    pub form_resets: u32,
}

#[derive(Debug)]
pub struct DomState {
    pub elements: Vec<Element>,
    pub viewport: (f64, f64),
    pub pixel_ratio: f64,
    pub window_scroll: f64,
    pub scrolled_into_view: Vec<NodeId>,
    /// Makes `create_child` fail, like a browser refusing a canvas.
    pub refuse_children: bool,
    /// Coarse primary pointer.
    pub touch: bool,
}

/// In-memory document shared between a test and the page under test.
#[derive(Clone, Debug)]
pub struct TestDom {
    state: Rc<RefCell<DomState>>,
}

impl TestDom {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(DomState {
                elements: Vec::new(),
                viewport: (width, height),
                pixel_ratio: 1.0,
                window_scroll: 0.0,
                scrolled_into_view: Vec::new(),
                refuse_children: false,
                touch: false,
            })),
        }
    }

    pub fn boxed(&self) -> Box<dyn Dom> {
        Box::new(self.clone())
    }

    /// Add an element described as `tag#id.class.class`.
    pub fn add(&self, parent: Option<NodeId>, spec: &str) -> NodeId {
        let simple = Simple::parse(spec);
        let mut state = self.state.borrow_mut();
        let node = NodeId(state.elements.len());
        state.elements.push(Element {
            tag: simple.tag.unwrap_or_else(|| "div".to_string()),
            id: simple.id,
            classes: simple.classes,
            parent,
            ..Element::default()
        });
        node
    }

    pub fn element(&self, node: NodeId) -> Element {
        self.state.borrow().elements[node.0].clone()
    }

    pub fn with<R>(&self, node: NodeId, f: impl FnOnce(&mut Element) -> R) -> R {
        f(&mut self.state.borrow_mut().elements[node.0])
    }

    pub fn state(&self) -> std::cell::Ref<'_, DomState> {
        self.state.borrow()
    }

    pub fn set_layout(&self, node: NodeId, top: f64, height: f64) {
        let width = self.state.borrow().viewport.0;
        self.with(node, |e| e.layout = Rect::new(top, 0.0, width, height));
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        self.with(node, |e| e.attrs.insert(name.to_string(), value.to_string()));
    }

    pub fn detach(&self, node: NodeId) {
        self.with(node, |e| e.detached = true);
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        self.state.borrow_mut().viewport = (width, height);
    }

    pub fn set_pixel_ratio(&self, ratio: f64) {
        self.state.borrow_mut().pixel_ratio = ratio;
    }

    pub fn set_touch(&self) {
        self.state.borrow_mut().touch = true;
    }

    pub fn set_window_scroll(&self, y: f64) {
        self.state.borrow_mut().window_scroll = y;
    }

    pub fn refuse_children(&self) {
        self.state.borrow_mut().refuse_children = true;
    }

    pub fn style(&self, node: NodeId) -> StyleState {
        self.element(node).style
    }

    pub fn text(&self, node: NodeId) -> String {
        self.element(node).text
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).classes.iter().any(|c| c == class)
    }

    pub fn children_matching(&self, parent: NodeId, selector: &str) -> Vec<NodeId> {
        self.clone().query_within(parent, selector)
    }

    pub fn first(&self, selector: &str) -> NodeId {
        self.clone()
            .query(selector)
            .unwrap_or_else(|| panic!("nothing matches {}", selector))
    }

    pub fn count(&self, selector: &str) -> usize {
        self.clone().query_all(selector).len()
    }

    fn is_live(state: &DomState, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            let element = &state.elements[n.0];
            if element.detached {
                return false;
            }
            current = element.parent;
        }
        true
    }

    fn is_descendant(state: &DomState, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = state.elements[node.0].parent;
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = state.elements[n.0].parent;
        }
        false
    }

    fn matches(state: &DomState, node: NodeId, selector: &str) -> bool {
        let mut parts: Vec<Simple> = selector.split_whitespace().map(Simple::parse).collect();
        let Some(last) = parts.pop() else {
            return false;
        };
        if !last.matches(&state.elements[node.0]) {
            return false;
        }
        let mut current = state.elements[node.0].parent;
        while let Some(part) = parts.last() {
            let Some(n) = current else {
                return false;
            };
            if part.matches(&state.elements[n.0]) {
                parts.pop();
            }
            current = state.elements[n.0].parent;
        }
        true
    }
}

/// A compound selector: `tag#id.class[attr^="prefix"]`.
#[derive(Debug, Default)]
struct Simple {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attr: Option<(String, Option<String>)>,
}

impl Simple {
    fn parse(part: &str) -> Self {
        let mut simple = Simple::default();
        let head = match part.split_once('[') {
            Some((head, attr)) => {
                let attr = attr.trim_end_matches(']');
                simple.attr = Some(match attr.split_once("^=") {
                    Some((name, prefix)) => {
                        (name.to_string(), Some(prefix.trim_matches('"').to_string()))
                    }
                    None => (attr.to_string(), None),
                });
                head
            }
            None => part,
        };
        let mut marker = None;
        let mut token = String::new();
        for c in head.chars().chain(std::iter::once('\0')) {
            if matches!(c, '#' | '.' | '\0') {
                match marker {
                    _ if token.is_empty() => {}
                    None => simple.tag = Some(token.clone()),
                    Some('#') => simple.id = Some(token.clone()),
                    Some(_) => simple.classes.push(token.clone()),
                }
                marker = Some(c);
                token.clear();
            } else {
                token.push(c);
            }
        }
        simple
    }

    fn matches(&self, element: &Element) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != element.tag) {
            return false;
        }
        if self.id.is_some() && self.id != element.id {
            return false;
        }
        if !self.classes.iter().all(|c| element.classes.contains(c)) {
            return false;
        }
        match &self.attr {
            None => true,
            Some((name, prefix)) => match (element.attrs.get(name), prefix) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(value), Some(prefix)) => value.starts_with(prefix.as_str()),
            },
        }
    }
}

fn anchors(html: &str) -> Vec<(String, String)> {
    html.split("<a ")
        .skip(1)
        .filter_map(|chunk| {
            let href = chunk.split_once("href=\"")?.1.split_once('"')?.0;
            let label = chunk.split_once('>')?.1.split_once("</a>")?.0;
            Some((href.to_string(), label.to_string()))
        })
        .collect()
}

impl Dom for TestDom {
    fn by_id(&mut self, id: &str) -> Option<NodeId> {
        let state = self.state.borrow();
        (0..state.elements.len())
            .map(NodeId)
            .find(|&n| state.elements[n.0].id.as_deref() == Some(id) && Self::is_live(&state, n))
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let state = self.state.borrow();
        (0..state.elements.len())
            .map(NodeId)
            .filter(|&n| Self::is_live(&state, n) && Self::matches(&state, n, selector))
            .collect()
    }

    fn query_within(&mut self, parent: NodeId, selector: &str) -> Vec<NodeId> {
        let state = self.state.borrow();
        (0..state.elements.len())
            .map(NodeId)
            .filter(|&n| {
                Self::is_live(&state, n)
                    && Self::is_descendant(&state, n, parent)
                    && Self::matches(&state, n, selector)
            })
            .collect()
    }

    fn set_style(&mut self, node: NodeId, prop: Prop, value: f64) {
        self.with(node, |e| match e.style.set(prop, value) {
            StyleChange::Transform => e.transform = Some(e.style.transform()),
            StyleChange::Opacity => e.opacity = Some(value),
            StyleChange::None => {}
        });
    }

    fn clear_transform(&mut self, node: NodeId) {
        self.with(node, |e| {
            e.transform = None;
            e.style = StyleState {
                opacity: e.style.opacity,
                ..StyleState::default()
            };
        });
    }

    fn has_inline_transform(&mut self, node: NodeId) -> bool {
        self.element(node).transform.is_some()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.with(node, |e| e.text = text.to_string());
    }

    fn set_html(&mut self, node: NodeId, html: &str) {
        self.with(node, |e| e.html = html.to_string());
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        self.with(node, |e| {
            if !e.classes.iter().any(|c| c == class) {
                e.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.with(node, |e| e.classes.retain(|c| c != class));
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if TestDom::has_class(self, node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn has_class(&mut self, node: NodeId, class: &str) -> bool {
        TestDom::has_class(self, node, class)
    }

    fn set_display(&mut self, node: NodeId, display: Option<&str>) {
        self.with(node, |e| e.display = display.map(str::to_string));
    }

    fn attr(&mut self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).attrs.get(name).cloned()
    }

    fn rect(&mut self, node: NodeId) -> Option<Rect> {
        let state = self.state.borrow();
        let mut rect = state.elements[node.0].layout;
        rect.top -= state.window_scroll;
        let mut current = Some(node);
        while let Some(n) = current {
            rect.top += state.elements[n.0].style.y;
            current = state.elements[n.0].parent;
        }
        Some(rect)
    }

    fn scroll_height(&mut self, node: NodeId) -> f64 {
        self.element(node).scroll_height
    }

    fn viewport(&self) -> (f64, f64) {
        self.state.borrow().viewport
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.state.borrow().pixel_ratio
    }

    fn scroll_into_view(&mut self, node: NodeId) {
        let top = self.element(node).layout.top;
        let mut state = self.state.borrow_mut();
        state.scrolled_into_view.push(node);
        state.window_scroll = top;
    }

    fn is_touch_device(&self) -> bool {
        self.state.borrow().touch
    }

    fn window_scroll(&self) -> f64 {
        self.state.borrow().window_scroll
    }

    fn scroll_window_to(&mut self, y: f64) {
        self.state.borrow_mut().window_scroll = y;
    }

    fn scroll_by(&mut self, node: NodeId, left: f64) {
        self.with(node, |e| e.scroll_left += left);
    }

    fn muted(&mut self, node: NodeId) -> Option<bool> {
        self.element(node).muted
    }

    fn set_muted(&mut self, node: NodeId, muted: bool) {
        self.with(node, |e| e.muted = Some(muted));
    }

    fn reset_form(&mut self, node: NodeId) {
        self.with(node, |e| e.form_resets += 1);
    }

    fn create_child(
        &mut self,
        parent: NodeId,
        tag: &str,
        class: Option<&str>,
        html: &str,
    ) -> Option<NodeId> {
        if self.state.borrow().refuse_children {
            return None;
        }
        let child = self.add(Some(parent), tag);
        self.with(child, |e| {
            e.classes.extend(class.map(str::to_string));
            e.html = html.to_string();
        });
        for (href, label) in anchors(html) {
            let link = self.add(Some(child), "a");
            self.set_attr(link, "href", &href);
            self.with(link, |e| e.text = label);
        }
        Some(child)
    }
}

/// Everything a [`RecordingBackend`] was asked to do.
#[derive(Debug, Default)]
pub struct BackendLog {
    pub resizes: Vec<(u32, u32)>,
    /// Car placement of every rendered frame.
    pub frames: Vec<Transform>,
    pub aspects: Vec<f32>,
    pub disposed: u32,
}

/// Scene backend that records calls instead of drawing.
pub struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,
    disposed: bool,
}

impl RecordingBackend {
    pub fn new() -> (Box<dyn SceneBackend>, Rc<RefCell<BackendLog>>) {
        let log = Rc::new(RefCell::new(BackendLog::default()));
        let backend = Self {
            log: log.clone(),
            disposed: false,
        };
        (Box::new(backend), log)
    }
}

impl SceneBackend for RecordingBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.log.borrow_mut().resizes.push((width, height));
    }

    fn render(&mut self, scene: &SceneState) -> Result<(), SceneError> {
        if !self.disposed {
            let mut log = self.log.borrow_mut();
            log.frames.push(scene.group);
            log.aspects.push(scene.camera.aspect);
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.log.borrow_mut().disposed += 1;
    }
}

/// Handles to the interesting parts of [`landing_page`].
#[derive(Clone, Debug)]
pub struct Landing {
    pub dom: TestDom,
    pub root: NodeId,
    pub loading: NodeId,
    pub loading_text: NodeId,
    pub nav: NodeId,
    pub nav_links: Vec<NodeId>,
    pub menu_button: NodeId,
    pub container: NodeId,
    pub hero: NodeId,
    pub particles: NodeId,
    pub car_container: NodeId,
    pub fallback: NodeId,
    pub title: NodeId,
    pub subtitle: NodeId,
    pub cta: NodeId,
    pub video: NodeId,
    pub video_toggle: NodeId,
    pub features: NodeId,
    pub cards: Vec<NodeId>,
    pub gallery: NodeId,
    pub wrapper: NodeId,
    pub gallery_items: Vec<NodeId>,
    pub specs: NodeId,
    pub spec_cards: Vec<NodeId>,
    pub spec_numbers: Vec<NodeId>,
    pub contact: NodeId,
    pub form: NodeId,
    pub submit_button: NodeId,
    pub submit_text: NodeId,
    pub submit_success: NodeId,
}

pub const SPEC_TARGETS: [&str; 4] = ["2.1", "500", "1020", "200"];

/// The production page in a 1280x800 viewport. Sections start at 0 (hero),
/// 900 (features), 1800 (gallery), 2700 (specs) and 3400 (contact); the
/// scroll container is 4000 px tall.
pub fn landing_page() -> Landing {
    let dom = TestDom::new(1280.0, 800.0);
    dom.set_pixel_ratio(2.0);

    let loading = dom.add(None, "div#loading");
    let loading_text = dom.add(Some(loading), "div.text-2xl");
    dom.set_layout(loading, 0.0, 800.0);

    let nav = dom.add(None, "nav");
    dom.set_layout(nav, 0.0, 80.0);
    let nav_links = ["#features", "#gallery", "#specs", "#contact", "/press"]
        .into_iter()
        .map(|href| {
            let link = dom.add(Some(nav), "a");
            dom.set_attr(link, "href", href);
            link
        })
        .collect();
    let menu_button = dom.add(Some(nav), "button#mobile-menu-btn");

    let container = dom.add(None, "main");
    dom.set_attr(container, "data-scroll-container", "");
    dom.set_layout(container, 0.0, 4000.0);
    dom.with(container, |e| e.scroll_height = 4000.0);

    let section = |id: &str, top: f64, height: f64| {
        let node = dom.add(Some(container), &format!("section#{}", id));
        dom.set_layout(node, top, height);
        node
    };

    let hero = section("hero", 0.0, 800.0);
    let particles = dom.add(Some(hero), "div#particles");
    let car_container = dom.add(Some(hero), "div#car-container");
    let fallback = dom.add(Some(hero), "img#fallback-image.hidden");
    let title = dom.add(Some(hero), "h1.hero-title");
    let subtitle = dom.add(Some(hero), "p.hero-subtitle");
    let cta = dom.add(Some(hero), "button.cta-button");
    let video = dom.add(Some(hero), "video#bg-video");
    dom.with(video, |e| e.muted = Some(true));
    let video_toggle = dom.add(Some(hero), "button#video-toggle");

    let features = section("features", 900.0, 800.0);
    let cards = (0..3)
        .map(|i| {
            let card = dom.add(Some(features), "div.feature-card");
            dom.set_layout(card, 1000.0 + 200.0 * i as f64, 180.0);
            card
        })
        .collect();

    let gallery = section("gallery", 1800.0, 800.0);
    let wrapper = dom.add(Some(gallery), "div.horizontal-scroll-wrapper");
    let gallery_items = (0..3)
        .map(|_| dom.add(Some(wrapper), "div.gallery-item"))
        .collect();

    let specs = section("specs", 2700.0, 600.0);
    let mut spec_cards = Vec::new();
    let mut spec_numbers = Vec::new();
    for target in SPEC_TARGETS {
        let card = dom.add(Some(specs), "div.spec-card");
        let number = dom.add(Some(card), "span.spec-number");
        dom.set_attr(number, "data-target", target);
        dom.with(number, |e| e.text = "0".to_string());
        spec_cards.push(card);
        spec_numbers.push(number);
    }

    let contact = section("contact", 3400.0, 600.0);
    let form = dom.add(Some(contact), "form#contact-form");
    let submit_button = dom.add(Some(form), "button#submit-btn");
    let submit_text = dom.add(Some(submit_button), "span#submit-text");
    let submit_success = dom.add(Some(submit_button), "span#submit-success.hidden");
    let root = dom.add(None, "html");

    Landing {
        dom,
        root,
        loading,
        loading_text,
        nav,
        nav_links,
        menu_button,
        container,
        hero,
        particles,
        car_container,
        fallback,
        title,
        subtitle,
        cta,
        video,
        video_toggle,
        features,
        cards,
        gallery,
        wrapper,
        gallery_items,
        specs,
        spec_cards,
        spec_numbers,
        contact,
        form,
        submit_button,
        submit_text,
        submit_success,
    }
}

impl Landing {
    pub fn start(&self, config: PageConfig) -> Page {
        Page::init(config, self.dom.boxed(), Duration::ZERO)
    }
}

pub fn listener(page: &Page, route: Route) -> ListenerId {
    page.bus()
        .find(route)
        .unwrap_or_else(|| panic!("no listener for {:?}", route))
}

pub fn fire(page: &mut Page, route: Route, event: DomEvent, now: Duration) -> Propagation {
    let id = listener(page, route);
    page.dispatch(id, &event, now)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
