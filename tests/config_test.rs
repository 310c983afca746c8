use hyperdrive::PageConfig;

#[test]
fn defaults_match_the_production_page() {
    let config = PageConfig::default();
    assert_eq!(config.loading.delay_ms, 1500);
    assert_eq!(config.loading.fade_ms, 100);
    assert_eq!(config.nav.scrolled_threshold, 100.0);
    assert_eq!(config.scene.fov_deg, 75.0);
    assert_eq!(config.scene.camera_position, [5.0, 2.0, 8.0]);
    assert_eq!(config.scene.resize_debounce_ms, 250);
    assert_eq!(config.scroll.trigger_start, 0.8);
    assert_eq!(config.scroll.counter_ms, 2000);
    assert_eq!(config.interactions.gallery_cooldown_ms, 100);
    assert_eq!(config.form.success_delay_ms, 1000);
    assert_eq!(config.form.reset_delay_ms, 3000);
}

#[test]
fn partial_json_overrides_only_what_it_names() {
    let config = PageConfig::from_json(
        r#"{
            "scroll": { "smooth": false },
            "scene": { "max_pixel_ratio": 2.0 }
        }"#,
    )
    .unwrap();
    assert!(!config.scroll.smooth);
    assert_eq!(config.scroll.multiplier, 0.8);
    assert_eq!(config.scene.max_pixel_ratio, 2.0);
    assert_eq!(config.scene.fov_deg, 75.0);
    assert_eq!(config.loading, PageConfig::default().loading);
}

#[test]
fn empty_object_is_the_default() {
    assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
}

#[test]
fn malformed_json_is_an_error() {
    let err = PageConfig::from_json(r#"{ "loading": { "delay_ms": "soon" } }"#).unwrap_err();
    assert!(err.to_string().contains("invalid page configuration"));
    assert!(PageConfig::from_json("not json").is_err());
}

#[test]
fn loads_from_a_file() {
    let path = std::env::temp_dir().join(format!("hyperdrive-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "nav": { "scrolled_threshold": 40 } }"#).unwrap();
    let config = PageConfig::from_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.unwrap().nav.scrolled_threshold, 40.0);
}

#[test]
fn missing_file_names_the_path() {
    let path = std::env::temp_dir().join("hyperdrive-no-such-config.json");
    let err = PageConfig::from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("hyperdrive-no-such-config.json"));
}
