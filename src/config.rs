use serde::{Deserialize, Serialize};
use crate::utils::constants::PUBLIC_CONTENT_TTL_MS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub environment: String,
    pub enable_logging: bool,
    pub cache_config: CacheConfig,
    pub upload_config: UploadConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            environment: "development".to_string(),
            enable_logging: true,
            cache_config: CacheConfig::default(),
            upload_config: UploadConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL por defecto de los datos cacheados (ms)
    pub default_ttl_ms: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: PUBLIC_CONTENT_TTL_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub bucket: String,
    pub default_max_size_mb: u64,
    pub cache_control_seconds: u32,
    /// Lado mayor (px) de las imágenes comprimidas
    pub image_max_dimension: u32,
    /// Calidad de re-codificación (0.0 - 1.0)
    pub image_quality: f64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            bucket: "public-files".to_string(),
            default_max_size_mb: 5,
            cache_control_seconds: 3600,
            image_max_dimension: 1920,
            image_quality: 0.8,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            supabase_url: option_env!("SUPABASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.supabase_url),
            supabase_anon_key: option_env!("SUPABASE_ANON_KEY")
                .map(|s| s.to_string())
                .unwrap_or(defaults.supabase_anon_key),
            environment: option_env!("ENVIRONMENT")
                .map(|s| s.to_string())
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enable_logging),
            cache_config: CacheConfig {
                default_ttl_ms: option_env!("CACHE_TTL_MS")
                    .and_then(|s| s.parse().ok())
                    .filter(|ttl: &i64| *ttl > 0)
                    .unwrap_or(defaults.cache_config.default_ttl_ms),
            },
            upload_config: UploadConfig {
                bucket: option_env!("STORAGE_BUCKET")
                    .map(|s| s.to_string())
                    .unwrap_or(defaults.upload_config.bucket),
                default_max_size_mb: option_env!("UPLOAD_MAX_SIZE_MB")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.upload_config.default_max_size_mb),
                cache_control_seconds: option_env!("UPLOAD_CACHE_CONTROL_SECONDS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.upload_config.cache_control_seconds),
                image_max_dimension: option_env!("IMAGE_MAX_DIMENSION")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.upload_config.image_max_dimension),
                image_quality: option_env!("IMAGE_QUALITY")
                    .and_then(|s| s.parse().ok())
                    .filter(|q: &f64| *q > 0.0 && *q <= 1.0)
                    .unwrap_or(defaults.upload_config.image_quality),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Nivel de log efectivo para wasm_logger
    pub fn log_level(&self) -> log::Level {
        if self.is_logging_enabled() {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
