// ============================================================================
// CONTENT STORE - Datos de un slice/clave tal como los ve la UI
// ============================================================================

use serde_json::Value;

/// Estado de una clave de contenido (lista de filas del backend)
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ContentStore {
    pub items: Vec<Value>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ContentStore {
    pub fn has_data(&self) -> bool {
        !self.items.is_empty()
    }

    /// Filas deserializadas al modelo de la página
    pub fn items_as<T: serde::de::DeserializeOwned>(&self) -> Vec<T> {
        self.items
            .iter()
            .filter_map(|item| match serde_json::from_value(item.clone()) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    log::warn!("⚠️ Fila descartada: {}", e);
                    None
                }
            })
            .collect()
    }
}
