use serde::{Deserialize, Serialize};
use crate::utils::constants::{PUBLIC_CONTENT_TTL_MS, STATIC_CONTENT_TTL_MS};

// ============================================================================
// SLICES DE CONTENIDO - Tablas del backend y claves de caché
// ============================================================================

/// Slice de contenido del portal (una tabla del backend = un mapa lastFetched)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentSlice {
    News,
    Events,
    Authorities,
    Regulations,
    PublicWorks,
    ServicesByCategory,
    Transparency,
}

impl ContentSlice {
    pub const ALL: [ContentSlice; 7] = [
        ContentSlice::News,
        ContentSlice::Events,
        ContentSlice::Authorities,
        ContentSlice::Regulations,
        ContentSlice::PublicWorks,
        ContentSlice::ServicesByCategory,
        ContentSlice::Transparency,
    ];

    /// Prefijo de las claves de datos de este slice
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSlice::News => "news",
            ContentSlice::Events => "events",
            ContentSlice::Authorities => "authorities",
            ContentSlice::Regulations => "regulations",
            ContentSlice::PublicWorks => "publicWorks",
            ContentSlice::ServicesByCategory => "servicesByCategory",
            ContentSlice::Transparency => "transparency",
        }
    }

    /// Tabla del backend
    pub fn table(&self) -> &'static str {
        match self {
            ContentSlice::News => "news",
            ContentSlice::Events => "events",
            ContentSlice::Authorities => "authorities",
            ContentSlice::Regulations => "regulations",
            ContentSlice::PublicWorks => "public_works",
            ContentSlice::ServicesByCategory => "services",
            ContentSlice::Transparency => "transparency_documents",
        }
    }

    /// TTL sugerido para los consumidores del slice
    pub fn default_ttl_ms(&self) -> i64 {
        match self {
            ContentSlice::Authorities | ContentSlice::Regulations | ContentSlice::Transparency => {
                STATIC_CONTENT_TTL_MS
            }
            _ => PUBLIC_CONTENT_TTL_MS,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|slice| slice.as_str() == s)
    }

    /// Clave de todo el slice ("news")
    pub fn key(&self) -> DataKey {
        DataKey(self.as_str().to_string())
    }

    /// Clave de un subconjunto ("servicesByCategory.salud")
    pub fn sub_key(&self, sub: &str) -> DataKey {
        DataKey(format!("{}.{}", self.as_str(), sub))
    }
}

/// Clave lógica de un recurso cacheado
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataKey(String);

impl DataKey {
    /// Construye una clave; las claves vacías no son válidas
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("La clave de datos no puede estar vacía".to_string());
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Nombre del slice: todo lo anterior al primer '.'
    pub fn slice_name(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    pub fn slice(&self) -> Option<ContentSlice> {
        ContentSlice::from_str(self.slice_name())
    }
}

impl std::fmt::Display for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
