// ============================================================================
// FETCH ACTION - Carga asíncrona + escritura de lastFetched SOLO si sale bien
// ============================================================================
// Un fetch fallido no toca lastFetched: el próximo montaje reintenta.
// ============================================================================

use std::future::Future;
use serde_json::Value;
use yew::Callback;
use crate::models::DataKey;
use crate::services::content_service::ContentService;
use crate::state::AppState;
use crate::utils::random::{Clock, SystemClock};

/// Ejecuta `loader` y vuelca el resultado en el estado global
pub async fn run_fetch<F, Fut>(
    app: &AppState,
    key: &DataKey,
    clock: &dyn Clock,
    loader: F,
) -> Result<usize, String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<Value>, String>>,
{
    app.set_loading(key, true);

    match loader().await {
        Ok(items) => {
            let count = items.len();
            app.store_items(key, items);
            app.fetch_registry.mark_fetched(key, clock.now_ms());
            Ok(count)
        }
        Err(e) => {
            log::error!("❌ Error cargando '{}': {}", key, e);
            app.set_error(key, e.clone());
            Err(e)
        }
    }
}

/// Acción sin argumentos para `use_cached_fetch`: dispara y se olvida
pub fn content_fetch_action(app: AppState, key: DataKey) -> Callback<()> {
    Callback::from(move |_| {
        let app = app.clone();
        let key = key.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let service = ContentService::from_config();
            let _ = run_fetch(&app, &key, &SystemClock, || service.fetch(&key)).await;
        });
    })
}
