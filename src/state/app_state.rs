// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================
// Se inyecta con ContextProvider<AppState>; nada de estáticos globales.
// ============================================================================

use std::collections::HashMap;
use serde_json::Value;
use crate::models::{ContentSlice, DataKey};
use crate::state::fetch_registry::FetchRegistry;
use crate::state::reactivity::{ReactiveState, SubscriptionId};
use crate::stores::ContentStore;

#[derive(Clone, PartialEq)]
pub struct AppState {
    pub fetch_registry: FetchRegistry,
    /// dataKey -> contenido
    content: ReactiveState<HashMap<String, ContentStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            fetch_registry: FetchRegistry::new(),
            content: ReactiveState::new(HashMap::new()),
        }
    }

    pub fn content_for(&self, key: &DataKey) -> ContentStore {
        self.content
            .with(|content| content.get(key.as_str()).cloned())
            .unwrap_or_default()
    }

    pub fn has_data(&self, key: &DataKey) -> bool {
        self.content
            .with(|content| content.get(key.as_str()).map(ContentStore::has_data))
            .unwrap_or(false)
    }

    pub fn set_loading(&self, key: &DataKey, loading: bool) {
        self.content.update(|content| {
            content.entry(key.as_str().to_string()).or_default().loading = loading;
        });
    }

    /// Resultado exitoso de un fetch (lastFetched lo escribe la acción)
    pub fn store_items(&self, key: &DataKey, items: Vec<Value>) {
        self.content.update(|content| {
            let store = content.entry(key.as_str().to_string()).or_default();
            store.items = items;
            store.loading = false;
            store.error = None;
        });
    }

    /// Fetch fallido: se conservan los datos anteriores
    pub fn set_error(&self, key: &DataKey, error: String) {
        self.content.update(|content| {
            let store = content.entry(key.as_str().to_string()).or_default();
            store.loading = false;
            store.error = Some(error);
        });
    }

    /// Tras crear/editar/borrar en el backoffice. Los datos quedan en pantalla
    /// y el próximo consumidor los refresca.
    pub fn invalidate(&self, slice: ContentSlice) {
        self.fetch_registry.invalidate_slice(slice.as_str());
    }

    /// Logout: todo vuelve a "nunca pedido"
    pub fn reset(&self) {
        self.fetch_registry.reset();
        self.content.set(HashMap::new());
    }

    pub fn subscribe_content<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.content.subscribe(callback)
    }

    pub fn unsubscribe_content(&self, id: SubscriptionId) {
        self.content.unsubscribe(id);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
