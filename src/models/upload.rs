use serde::{Deserialize, Serialize};
use crate::config::CONFIG;

// ============================================================================
// MODELOS DE SUBIDA DE ARCHIVOS
// ============================================================================

/// Archivo elegido por el usuario, ya leído en memoria
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    /// Tipo MIME declarado por el navegador (puede mentir)
    pub declared_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Primeros 8 bytes (firma binaria)
    pub fn header(&self) -> &[u8] {
        &self.bytes[..self.bytes.len().min(8)]
    }

    pub fn is_image(&self) -> bool {
        self.declared_type.starts_with("image/")
    }
}

/// Opciones de una subida
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOptions {
    /// Tamaño máximo en MB
    pub max_size_mb: u64,
    /// Tipos MIME aceptados (None = cualquiera)
    pub allowed_types: Option<Vec<String>>,
    /// Carpeta destino dentro del bucket ("noticias", "autoridades/fotos")
    pub folder: Option<String>,
    /// Nombre de archivo personalizado; si falta se genera uno único
    pub custom_name: Option<String>,
}

impl UploadOptions {
    pub fn new(max_size_mb: u64) -> Self {
        Self {
            max_size_mb,
            allowed_types: None,
            folder: None,
            custom_name: None,
        }
    }

    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }

    /// Preset para imágenes de noticias, autoridades, obras
    pub fn images(max_size_mb: u64) -> Self {
        Self::new(max_size_mb).with_allowed_types(["image/jpeg", "image/png", "image/webp"])
    }

    /// Preset para documentos (reglamentos, transparencia)
    pub fn documents(max_size_mb: u64) -> Self {
        Self::new(max_size_mb).with_allowed_types(["application/pdf"])
    }
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self::new(CONFIG.upload_config.default_max_size_mb)
    }
}

/// Progreso de la subida
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
    pub percentage: u8,
}

impl UploadProgress {
    pub fn new(loaded: u64, total: u64) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((loaded.min(total) * 100) / total) as u8
        };
        Self { loaded, total, percentage }
    }

    pub fn complete(total: u64) -> Self {
        Self {
            loaded: total,
            total,
            percentage: 100,
        }
    }
}

/// Estado visible de un intento de subida (sin el archivo)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadSnapshot {
    pub uploading: bool,
    pub progress: UploadProgress,
    pub error: Option<String>,
}
