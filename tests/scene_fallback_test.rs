use hyperdrive::{
    PageConfig,
    bus::{DomEvent, Route},
    scene::{SceneError, SceneVisibility},
};

use crate::common::test_utils::{RecordingBackend, fire, frames, landing_page, ms};

mod common;

#[test]
fn canvas_replaces_nothing_when_the_renderer_starts() {
    let landing = landing_page();
    let dom = &landing.dom;
    let mut page = landing.start(PageConfig::default());
    assert_eq!(page.scene().visibility(), SceneVisibility::Pending);
    let canvas = page.scene().canvas().unwrap();
    assert_eq!(dom.element(canvas).tag, "canvas");
    assert_eq!(dom.element(canvas).parent, Some(landing.car_container));

    let (backend, log) = RecordingBackend::new();
    page.attach_scene(Ok(backend));
    assert_eq!(page.scene().visibility(), SceneVisibility::Canvas);
    assert!(dom.has_class(landing.fallback, "hidden"));
    assert_eq!(dom.element(landing.car_container).display, None);
    // device pixel ratio 2 is capped at 1
    assert_eq!(log.borrow().resizes, vec![(1280, 800)]);
}

#[test]
fn renderer_failure_shows_the_fallback_image() {
    let landing = landing_page();
    let dom = &landing.dom;
    let mut page = landing.start(PageConfig::default());
    page.attach_scene(Err(SceneError::Adapter("no adapter".into())));

    assert_eq!(page.scene().visibility(), SceneVisibility::Fallback);
    assert!(!dom.has_class(landing.fallback, "hidden"));
    assert_eq!(dom.element(landing.car_container).display.as_deref(), Some("none"));
    assert!(!page.scene().has_backend());

    // the rest of the page keeps working
    frames(&mut page, ms(0), ms(1700));
    assert!(!page.is_loading());
}

#[test]
fn container_stays_put_without_a_fallback_image() {
    let landing = landing_page();
    let dom = &landing.dom;
    dom.detach(landing.fallback);
    let mut page = landing.start(PageConfig::default());
    page.attach_scene(Err(SceneError::Adapter("no adapter".into())));

    assert_eq!(page.scene().visibility(), SceneVisibility::Absent);
    assert_eq!(dom.element(landing.car_container).display, None);

    let (backend, log) = RecordingBackend::new();
    page.attach_scene(Ok(backend));
    assert_eq!(log.borrow().disposed, 1);
}

#[test]
fn refused_canvas_falls_back_immediately() {
    let landing = landing_page();
    landing.dom.refuse_children();
    let mut page = landing.start(PageConfig::default());
    assert_eq!(page.scene().visibility(), SceneVisibility::Fallback);
    assert!(!landing.dom.has_class(landing.fallback, "hidden"));

    let (backend, log) = RecordingBackend::new();
    page.attach_scene(Ok(backend));
    assert_eq!(page.scene().visibility(), SceneVisibility::Fallback);
    assert_eq!(log.borrow().disposed, 1);
}

#[test]
fn no_container_means_no_scene() {
    let landing = landing_page();
    landing.dom.detach(landing.car_container);
    let mut page = landing.start(PageConfig::default());
    assert_eq!(page.scene().visibility(), SceneVisibility::Absent);
    assert!(page.scene().canvas().is_none());
    assert!(landing.dom.has_class(landing.fallback, "hidden"));

    let (backend, log) = RecordingBackend::new();
    page.attach_scene(Ok(backend));
    assert_eq!(log.borrow().disposed, 1);
    frames(&mut page, ms(0), ms(100));
    assert!(log.borrow().frames.is_empty());
}

#[test]
fn unload_disposes_the_renderer() {
    let landing = landing_page();
    let mut page = landing.start(PageConfig::default());
    let (backend, log) = RecordingBackend::new();
    page.attach_scene(Ok(backend));
    frames(&mut page, ms(0), ms(160));
    let rendered = log.borrow().frames.len();
    assert_eq!(rendered, 10);

    fire(&mut page, Route::Unload, DomEvent::BeforeUnload, ms(170));
    assert!(page.is_torn_down());
    assert_eq!(log.borrow().disposed, 1);

    frames(&mut page, ms(170), ms(500));
    page.teardown();
    assert_eq!(log.borrow().frames.len(), rendered);
    assert_eq!(log.borrow().disposed, 1);
}

#[test]
fn renderer_arriving_after_unload_is_released() {
    let landing = landing_page();
    let mut page = landing.start(PageConfig::default());
    page.teardown();
    let (backend, log) = RecordingBackend::new();
    page.attach_scene(Ok(backend));
    assert_eq!(log.borrow().disposed, 1);
    assert!(!page.scene().has_backend());
}
