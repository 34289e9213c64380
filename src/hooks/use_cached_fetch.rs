// ============================================================================
// USE CACHED FETCH HOOK - Stale-while-revalidate por dataKey
// ============================================================================
// Muestra lo que haya en cache y, si está vencido o nunca se pidió,
// despacha `fetch` UNA vez por montaje y ventana de vencimiento.
// ============================================================================

use std::convert::TryFrom;
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use crate::models::{CacheStatus, DataKey};
use crate::state::{FetchRegistry, FreshnessGate};
use crate::utils::random::{Clock, SystemClock};

#[derive(Clone, Debug, PartialEq)]
pub struct UseCachedFetchHandle {
    pub last_fetched: i64,
    pub is_stale: bool,
    pub is_first_load: bool,
    pub is_background_refresh: bool,
    pub status: CacheStatus,
}

#[hook]
pub fn use_cached_fetch(
    registry: FetchRegistry,
    data_key: DataKey,
    fetch: Callback<()>,
    ttl_ms: i64,
    has_data: bool,
) -> UseCachedFetchHandle {
    let force_update = use_force_update();
    let gate = {
        let data_key = data_key.clone();
        use_mut_ref(move || FreshnessGate::with_fallback_ttl(data_key, ttl_ms))
    };
    gate.borrow_mut().set_ttl(ttl_ms);
    let ttl = gate.borrow().ttl_ms();

    // Re-render cuando otro consumidor (o una invalidación) toca el registry
    {
        let force_update = force_update.clone();
        use_effect_with(registry.clone(), move |registry| {
            let id = registry.subscribe(move || force_update.force_update());
            let registry = registry.clone();
            move || registry.unsubscribe(id)
        });
    }

    let now = SystemClock.now_ms();
    let last_fetched = registry.last_fetched(&data_key);
    let freshness = gate.borrow().evaluate(last_fetched, now, has_data);

    // Efecto con deps (dataKey, needs_fetch); el cleanup libera el guard
    {
        let gate = gate.clone();
        let registry = registry.clone();
        use_effect_with((data_key.clone(), freshness.needs_fetch), move |(key, _)| {
            {
                let mut gate = gate.borrow_mut();
                gate.set_data_key(key.clone());
                let last_fetched = registry.last_fetched(key);
                gate.check(last_fetched, SystemClock.now_ms(), has_data, || fetch.emit(()));
            }
            move || gate.borrow_mut().release()
        });
    }

    // Sin re-render no hay re-evaluación: programar uno justo al vencer
    {
        let remaining = freshness.remaining_ms(now, ttl);
        use_effect_with((data_key.clone(), last_fetched, ttl), move |_| {
            let timeout = remaining.map(|ms| {
                let ms = u32::try_from(ms).unwrap_or(u32::MAX);
                Timeout::new(ms, move || force_update.force_update())
            });
            move || drop(timeout)
        });
    }

    UseCachedFetchHandle {
        last_fetched,
        is_stale: freshness.is_stale,
        is_first_load: freshness.is_first_load,
        is_background_refresh: freshness.is_background_refresh,
        status: freshness.status(),
    }
}
