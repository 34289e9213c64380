// ============================================================================
// USE APP STATE HOOK - Acceso al AppState inyectado por contexto
// ============================================================================

use yew::prelude::*;
use crate::config::CONFIG;
use crate::models::DataKey;
use crate::services::content_fetch_action;
use crate::state::AppState;
use crate::stores::ContentStore;
use crate::hooks::use_cached_fetch::{use_cached_fetch, UseCachedFetchHandle};

/// AppState del `ContextProvider` más cercano. Sin proveedor se usa uno local
/// al componente (útil en tests de componentes aislados).
#[hook]
pub fn use_app_state() -> AppState {
    let context = use_context::<AppState>();
    let missing_provider = context.is_none();
    let fallback = use_state(move || {
        if missing_provider {
            log::warn!("⚠️ Sin ContextProvider<AppState>, usando estado local");
        }
        AppState::new()
    });
    context.unwrap_or_else(|| (*fallback).clone())
}

#[derive(Clone, Debug, PartialEq)]
pub struct UseCachedContentHandle {
    pub content: ContentStore,
    pub cache: UseCachedFetchHandle,
}

/// Contenido público de una clave con refresco en segundo plano.
/// `ttl_ms` None = TTL sugerido del slice.
#[hook]
pub fn use_cached_content(data_key: DataKey, ttl_ms: Option<i64>) -> UseCachedContentHandle {
    let app = use_app_state();
    let force_update = use_force_update();

    {
        use_effect_with(app.clone(), move |app| {
            let id = app.subscribe_content(move || force_update.force_update());
            let app = app.clone();
            move || app.unsubscribe_content(id)
        });
    }

    let ttl_ms = ttl_ms
        .or_else(|| data_key.slice().map(|slice| slice.default_ttl_ms()))
        .unwrap_or(CONFIG.cache_config.default_ttl_ms);
    let content = app.content_for(&data_key);
    let fetch = content_fetch_action(app.clone(), data_key.clone());
    let cache = use_cached_fetch(
        app.fetch_registry.clone(),
        data_key,
        fetch,
        ttl_ms,
        content.has_data(),
    );

    UseCachedContentHandle { content, cache }
}
