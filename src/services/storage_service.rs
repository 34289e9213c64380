// ============================================================================
// STORAGE SERVICE - SOLO COMUNICACIÓN CON EL STORAGE DEL BACKEND
// ============================================================================
// El trait es la costura: en el navegador se usa SupabaseStorage (gloo-net),
// en los tests un storage en memoria.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use crate::config::CONFIG;

/// Error devuelto por el backend de storage
#[derive(Debug, Clone, PartialEq)]
pub struct StorageError {
    pub status: Option<u16>,
    /// Código corto del backend ("Duplicate", "Payload too large", ...)
    pub error: Option<String>,
    pub message: String,
}

impl StorageError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            error: None,
            message: message.into(),
        }
    }

    pub fn http(status: u16, error: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, &self.error) {
            (Some(status), Some(code)) => write!(f, "HTTP {} ({}): {}", status, code, self.message),
            (Some(status), None) => write!(f, "HTTP {}: {}", status, self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for StorageError {}

/// Opciones de escritura de un objeto
#[derive(Debug, Clone, PartialEq)]
pub struct FileUploadOptions {
    pub cache_control_seconds: u32,
    pub content_type: String,
    /// Siempre false en el portal: nunca se pisa un objeto existente
    pub upsert: bool,
}

impl FileUploadOptions {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            cache_control_seconds: CONFIG.upload_config.cache_control_seconds,
            content_type: content_type.into(),
            upsert: false,
        }
    }
}

#[async_trait(?Send)]
pub trait StorageBackend {
    /// Escribe el objeto; devuelve la ruta guardada
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        options: &FileUploadOptions,
    ) -> Result<String, StorageError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;
}

/// Forma de error JSON del storage de Supabase
#[derive(Debug, Deserialize)]
struct RawStorageError {
    #[serde(rename = "statusCode")]
    status_code: Option<serde_json::Value>,
    error: Option<String>,
    message: Option<String>,
}

/// Cliente del storage de Supabase - SOLO HTTP (stateless)
#[derive(Clone, Debug)]
pub struct SupabaseStorage {
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl SupabaseStorage {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    pub fn from_config() -> Self {
        Self::new(CONFIG.supabase_url.clone(), CONFIG.supabase_anon_key.clone())
    }

    /// Token de sesión del backoffice (si no, se usa la anon key)
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(self.anon_key.as_str());
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", token))
    }

    async fn error_from_response(response: Response) -> StorageError {
        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<RawStorageError>(&body) {
            Ok(raw) => {
                let status = raw
                    .status_code
                    .and_then(|v| match v {
                        serde_json::Value::Number(n) => n.as_u64().map(|n| n as u16),
                        serde_json::Value::String(s) => s.parse().ok(),
                        _ => None,
                    })
                    .unwrap_or(status);
                StorageError::http(status, raw.error, raw.message.unwrap_or(status_text))
            }
            Err(_) if !body.is_empty() => StorageError::http(status, None, body),
            Err(_) => StorageError::http(status, None, status_text),
        }
    }
}

#[async_trait(?Send)]
impl StorageBackend for SupabaseStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        options: &FileUploadOptions,
    ) -> Result<String, StorageError> {
        let url = self.object_url(bucket, path);

        log::info!("⬆️ Subiendo {} ({} bytes) a {}", path, bytes.len(), bucket);

        let request = self
            .authorize(Request::post(&url))
            .header("Content-Type", &options.content_type)
            .header("cache-control", &format!("max-age={}", options.cache_control_seconds))
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(js_sys::Uint8Array::from(bytes))
            .map_err(|e| StorageError::network(format!("Request build error: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::network(format!("Network error: {}", e)))?;

        if !response.ok() {
            let error = Self::error_from_response(response).await;
            log::error!("❌ Error subiendo {}: {}", path, error);
            return Err(error);
        }

        log::info!("✅ Archivo subido: {}/{}", bucket, path);
        Ok(path.to_string())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            path.trim_start_matches('/')
        )
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, bucket);

        log::info!("🗑️ Eliminando {:?} de {}", paths, bucket);

        let response = self
            .authorize(Request::delete(&url))
            .json(&serde_json::json!({ "prefixes": paths }))
            .map_err(|e| StorageError::network(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| StorageError::network(format!("Network error: {}", e)))?;

        if response.ok() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }
}
