//! Facade-level flows: configuration files, file-backed preferences, and the
//! store driven through a scroll detour.

use dotcal::prelude::*;
use dotcal::{FilePreferences, PreferenceStore, Recovery, TourPhase, load_tutorial_config};
use web_time::{Duration, Instant};

fn page(scrolled: bool) -> PageSnapshot {
    let below_fold = if scrolled { 0.0 } else { 900.0 };
    PageSnapshot::new(
        [
            Some(DomRect::new(96.0, 24.0, 220.0, 48.0)),
            Some(DomRect::new(180.0 + below_fold, 24.0, 220.0, 40.0)),
            Some(DomRect::new(320.0, 520.0, 480.0, 320.0)),
            Some(DomRect::new(72.0, 1000.0, 200.0, 40.0)),
            Some(DomRect::new(240.0, 24.0, 220.0, 40.0)),
        ],
        Viewport::new(1280.0, 800.0),
    )
}

#[test]
fn section_survives_reload_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");

    let prefs = FilePreferences::open(&path).expect("open");
    let mut store = OnboardingStore::new(prefs, true).expect("store");
    assert!(store.select_section(UserKind::Team).expect("select"));
    drop(store);

    let prefs = FilePreferences::open(&path).expect("reopen");
    assert_eq!(
        prefs.load("currentSection").expect("load"),
        Some("team".to_owned())
    );
    let store = OnboardingStore::new(prefs, true).expect("store");
    assert_eq!(store.current_section(), UserKind::Team);
}

#[test]
fn config_loaded_by_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let toml_path = dir.path().join("tour.toml");
    std::fs::write(&toml_path, "settle_delay_ms = 250\nexit_duration_ms = 120\n").expect("write");
    let config = load_tutorial_config(&toml_path).expect("toml");
    assert_eq!(config.settle_delay_ms, 250);
    assert_eq!(config.exit_duration_ms, 120);

    let json_path = dir.path().join("tour.json");
    std::fs::write(&json_path, r#"{"nav_offset": 64.0}"#).expect("write");
    let config = load_tutorial_config(&json_path).expect("json");
    assert_eq!(config.nav_offset, 64.0);
}

#[test]
fn invalid_config_maps_to_defaults_recovery() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tour.toml");
    std::fs::write(&path, "arrow_height = -4.0\n").expect("write");
    let err = load_tutorial_config(&path).unwrap_err();
    assert_eq!(err.error_type(), "config");
    assert_eq!(err.recovery(), Recovery::UseDefaults);

    let err = load_tutorial_config(dir.path().join("missing.toml")).unwrap_err();
    assert_eq!(err.recovery(), Recovery::UseDefaults);
}

#[test]
fn next_rechecks_after_requested_scroll() {
    let mut store = OnboardingStore::new(MemoryPreferences::new(), false).expect("store");
    store.open_tutorial();
    store.advance_step(&page(false));
    assert_eq!(store.phase(), TourPhase::AwaitingScroll { next: 2 });

    let effects = store.advance_step(&page(false));
    assert!(matches!(
        effects.as_slice(),
        [TourEffect::ScrollIntoView { step: 2, .. }]
    ));
    assert_eq!(store.current_step(), 1);

    assert!(store.advance_step(&page(true)).is_empty());
    assert_eq!(store.current_step(), 2);
    assert_eq!(store.phase(), TourPhase::Open);
}

#[test]
fn scroll_detour_then_finish() {
    let mut store = OnboardingStore::new(MemoryPreferences::new(), false).expect("store");
    let mut now = Instant::now();
    store.open_tutorial();

    let effects = store.advance_step(&page(false));
    assert!(matches!(
        effects.first(),
        Some(TourEffect::ScrollIntoView { step: 2, .. })
    ));
    assert!(effects.contains(&TourEffect::LeftFirstStep));

    store.scrolled(now);
    now += Duration::from_millis(150);
    store.tick(now, Duration::from_millis(150), &page(true));
    assert_eq!(store.current_step(), 2);

    for _ in 0..3 {
        store.advance_step(&page(true));
    }
    assert_eq!(store.current_step(), 5);
    store.advance_step(&page(true));
    assert_eq!(store.phase(), TourPhase::Closing);

    now += Duration::from_millis(400);
    let effects = store.tick(now, Duration::from_millis(400), &page(true));
    assert_eq!(effects, vec![TourEffect::Closed]);
    assert_eq!(store.current_step(), 1);
    assert!(store.overlay(&page(true), Size::new(320.0, 140.0)).is_none());
}
