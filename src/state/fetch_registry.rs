// ============================================================================
// FETCH REGISTRY - Mapas lastFetched por slice (propiedad del estado global)
// ============================================================================
// Solo la acción de fetch escribe aquí, y solo tras un fetch exitoso.
// Los gates de frescura solo leen.
// ============================================================================

use std::collections::HashMap;
use crate::models::DataKey;
use crate::state::reactivity::{ReactiveState, SubscriptionId};

/// slice -> (dataKey -> epoch ms del último fetch exitoso)
type SliceMaps = HashMap<String, HashMap<String, i64>>;

#[derive(Clone, PartialEq)]
pub struct FetchRegistry {
    slices: ReactiveState<SliceMaps>,
}

impl FetchRegistry {
    pub fn new() -> Self {
        Self {
            slices: ReactiveState::new(HashMap::new()),
        }
    }

    /// 0 = nunca pedido
    pub fn last_fetched(&self, key: &DataKey) -> i64 {
        self.slices.with(|slices| {
            slices
                .get(key.slice_name())
                .and_then(|entries| entries.get(key.as_str()))
                .copied()
                .unwrap_or(0)
        })
    }

    /// Registrar un fetch exitoso
    pub fn mark_fetched(&self, key: &DataKey, at: i64) {
        log::debug!("🗂️ lastFetched[{}] = {}", key, at);
        self.slices.update(|slices| {
            slices
                .entry(key.slice_name().to_string())
                .or_default()
                .insert(key.as_str().to_string(), at);
        });
    }

    /// Tras una mutación (crear/editar/borrar) se invalida el slice completo
    pub fn invalidate_slice(&self, slice_name: &str) {
        let keys = self.keys_in_slice(slice_name);
        if keys.is_empty() {
            return;
        }
        log::info!("♻️ Caché invalidada para slice '{}': {:?}", slice_name, keys);
        self.slices.update(|slices| {
            slices.remove(slice_name);
        });
    }

    /// Reset total (logout del backoffice)
    pub fn reset(&self) {
        self.slices.set(HashMap::new());
    }

    /// Claves registradas de un slice, ordenadas
    pub fn keys_in_slice(&self, slice_name: &str) -> Vec<String> {
        self.slices.with(|slices| {
            let mut keys: Vec<String> = slices
                .get(slice_name)
                .map(|entries| entries.keys().cloned().collect())
                .unwrap_or_default();
            keys.sort();
            keys
        })
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.slices.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.slices.unsubscribe(id);
    }
}

impl Default for FetchRegistry {
    fn default() -> Self {
        Self::new()
    }
}
