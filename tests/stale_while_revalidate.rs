// Montajes sucesivos de un consumidor de "news" con TTL de 60s

use std::cell::Cell;

use futures::executor::block_on;
use portal_municipal::models::{CacheStatus, ContentSlice};
use portal_municipal::services::run_fetch;
use portal_municipal::state::{AppState, FreshnessGate};
use portal_municipal::utils::Clock;
use serde_json::json;

const TTL: i64 = 60_000;
const T: i64 = 1_700_000_000_000;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Un montaje: check del gate y, si despacha, fetch resuelto en `now`
fn mount(app: &AppState, gate: &mut FreshnessGate, now: i64, succeed: bool) -> (bool, CacheStatus) {
    let key = gate.data_key().clone();
    let dispatched = Cell::new(false);
    let mut mounted = gate.mount();

    let check = mounted.check(
        app.fetch_registry.last_fetched(&key),
        now,
        app.has_data(&key),
        || dispatched.set(true),
    );

    if dispatched.get() {
        let _ = block_on(run_fetch(app, &key, &FixedClock(now), || async move {
            if succeed {
                Ok(vec![json!({"id": 1, "title": "Feria del libro"})])
            } else {
                Err("Network error: offline".to_string())
            }
        }));
    }

    (check.dispatched, check.freshness.status())
}

#[test]
fn news_consumer_refreshes_only_after_ttl() {
    let app = AppState::new();
    let mut gate = FreshnessGate::new(ContentSlice::News.key(), TTL).unwrap();

    let (fetched, status) = mount(&app, &mut gate, T, true);
    assert!(fetched);
    assert_eq!(status, CacheStatus::FirstLoad);
    assert_eq!(app.fetch_registry.last_fetched(&ContentSlice::News.key()), T);

    let (fetched, status) = mount(&app, &mut gate, T + 30_000, true);
    assert!(!fetched);
    assert_eq!(status, CacheStatus::Fresh);

    let (fetched, status) = mount(&app, &mut gate, T + 70_000, true);
    assert!(fetched);
    assert_eq!(status, CacheStatus::BackgroundRefresh);
    assert_eq!(app.fetch_registry.last_fetched(&ContentSlice::News.key()), T + 70_000);
}

#[test]
fn failed_fetch_is_retried_on_next_mount() {
    let app = AppState::new();
    let mut gate = FreshnessGate::new(ContentSlice::Events.key(), TTL).unwrap();

    let (fetched, _) = mount(&app, &mut gate, T, false);
    assert!(fetched);
    assert_eq!(app.fetch_registry.last_fetched(&ContentSlice::Events.key()), 0);
    assert!(app.content_for(&ContentSlice::Events.key()).error.is_some());

    let (fetched, _) = mount(&app, &mut gate, T + 1_000, true);
    assert!(fetched);
    assert!(app.has_data(&ContentSlice::Events.key()));
}

#[test]
fn invalidated_slice_is_fetched_again() {
    let app = AppState::new();
    let salud = ContentSlice::ServicesByCategory.sub_key("salud");
    let mut gate = FreshnessGate::new(salud.clone(), TTL).unwrap();

    assert!(mount(&app, &mut gate, T, true).0);
    assert!(!mount(&app, &mut gate, T + 1_000, true).0);

    app.invalidate(ContentSlice::ServicesByCategory);

    let (fetched, status) = mount(&app, &mut gate, T + 2_000, true);
    assert!(fetched);
    // los datos anteriores siguen visibles durante el refresco
    assert_ne!(status, CacheStatus::FirstLoad);
}
