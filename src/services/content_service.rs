// ============================================================================
// CONTENT SERVICE - SOLO COMUNICACIÓN HTTP con la API REST del backend
// ============================================================================

use gloo_net::http::Request;
use serde_json::Value;
use crate::config::CONFIG;
use crate::models::{ContentSlice, DataKey};

/// Columna por la que se filtra el sub-recurso de una clave ("servicesByCategory.salud")
pub fn sub_filter_column(slice: ContentSlice) -> Option<&'static str> {
    match slice {
        ContentSlice::ServicesByCategory => Some("category"),
        ContentSlice::Transparency => Some("section"),
        ContentSlice::Regulations => Some("type"),
        _ => None,
    }
}

/// Orden por defecto de cada tabla
fn default_order(slice: ContentSlice) -> &'static str {
    match slice {
        ContentSlice::News => "published_at.desc",
        ContentSlice::Events => "start_date.asc",
        ContentSlice::Authorities => "position.asc",
        _ => "created_at.desc",
    }
}

/// Query string de PostgREST para una clave de datos
pub fn query_for(key: &DataKey) -> Result<(ContentSlice, String), String> {
    let slice = key
        .slice()
        .ok_or_else(|| format!("Slice desconocido: {}", key.slice_name()))?;

    let mut query = format!("select=*&order={}", default_order(slice));

    if let Some((_, sub)) = key.as_str().split_once('.') {
        let column = sub_filter_column(slice)
            .ok_or_else(|| format!("'{}' no admite sub-claves", slice.as_str()))?;
        let value: String = url::form_urlencoded::byte_serialize(sub.as_bytes()).collect();
        query.push_str(&format!("&{}=eq.{}", column, value));
    }

    Ok((slice, query))
}

/// Cliente de contenido - stateless
#[derive(Clone, Debug)]
pub struct ContentService {
    base_url: String,
    anon_key: String,
}

impl ContentService {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(CONFIG.supabase_url.clone(), CONFIG.supabase_anon_key.clone())
    }

    /// Filas de la tabla correspondiente a la clave
    pub async fn fetch(&self, key: &DataKey) -> Result<Vec<Value>, String> {
        let (slice, query) = query_for(key)?;
        let url = format!("{}/rest/v1/{}?{}", self.base_url, slice.table(), query);

        log::info!("📥 Cargando '{}'", key);

        let response = Request::get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.anon_key))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let status = response.status();
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!("HTTP error {}: {}", status, error_text));
        }

        let rows = response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))?;

        log::info!("✅ '{}': {} filas", key, rows.len());
        Ok(rows)
    }
}
