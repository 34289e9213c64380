// ============================================================================
// TRADUCCIÓN DE ERRORES - Errores del backend -> mensajes para el usuario
// ============================================================================

use crate::services::storage_service::StorageError;

/// Mensaje genérico cuando la subida falla sin causa reconocible
pub const UPLOAD_FALLBACK: &str = "Error al subir el archivo";
pub const DELETE_FALLBACK: &str = "Error al eliminar el archivo";

/// Traduce un error crudo del backend; si no se reconoce, usa `fallback`
pub fn translate_error(raw: &StorageError, fallback: &str) -> String {
    let code = raw.error.as_deref().unwrap_or("").to_lowercase();
    let message = raw.message.to_lowercase();

    let translated = match raw.status {
        Some(409) => Some("Ya existe un archivo con ese nombre"),
        Some(413) => Some("El archivo es demasiado grande para el servidor"),
        Some(401) => Some("La sesión expiró, vuelva a iniciar sesión"),
        Some(403) => Some("No tiene permisos para realizar esta acción"),
        Some(404) => Some("El archivo o el bucket no existe"),
        Some(429) => Some("Demasiadas solicitudes, intente nuevamente en unos minutos"),
        Some(status) if status >= 500 => Some("El servidor no está disponible, intente más tarde"),
        _ => None,
    };

    let translated = translated.or_else(|| {
        if code.contains("duplicate") || message.contains("already exists") {
            Some("Ya existe un archivo con ese nombre")
        } else if message.contains("row-level security") || message.contains("unauthorized") {
            Some("No tiene permisos para realizar esta acción")
        } else if message.contains("jwt") {
            Some("La sesión expiró, vuelva a iniciar sesión")
        } else if message.contains("payload too large") || message.contains("maximum allowed size") {
            Some("El archivo es demasiado grande para el servidor")
        } else if message.contains("network") || message.contains("failed to fetch") {
            Some("Error de conexión, verifique su red")
        } else {
            None
        }
    });

    match translated {
        Some(text) => text.to_string(),
        None => {
            log::warn!("⚠️ Error no reconocido del backend: {}", raw);
            fallback.to_string()
        }
    }
}

/// Variante para errores que solo vienen como texto
pub fn translate_message(raw: &str, fallback: &str) -> String {
    translate_error(&StorageError::network(raw), fallback)
}
