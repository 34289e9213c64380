// ============================================================================
// VALIDACIÓN DE SUBIDAS - Se corta en el primer fallo, antes de cualquier red
// ============================================================================

use thiserror::Error;
use crate::models::{SelectedFile, UploadOptions};
use crate::utils::file_signature::{extension_matches, signature_matches, sniff_mime};

/// Errores de validación con mensaje fijo para el usuario
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No se seleccionó ningún archivo")]
    NoFile,

    #[error("El archivo excede el tamaño máximo de {max_mb}MB")]
    TooLarge { max_mb: u64 },

    #[error("Tipo de archivo no permitido")]
    TypeNotAllowed,

    #[error("La extensión del archivo no coincide con su tipo")]
    ExtensionMismatch,

    #[error("El contenido del archivo no corresponde a su tipo declarado")]
    SignatureMismatch,
}

/// Pasos 1-5: presencia, tamaño, tipo declarado, extensión, firma binaria
pub fn validate_file(file: Option<&SelectedFile>, options: &UploadOptions) -> Result<(), UploadError> {
    let file = file.ok_or(UploadError::NoFile)?;

    if file.size() > options.max_size_bytes() {
        return Err(UploadError::TooLarge {
            max_mb: options.max_size_mb,
        });
    }

    if let Some(allowed) = &options.allowed_types {
        if !allowed.iter().any(|t| *t == file.declared_type) {
            return Err(UploadError::TypeNotAllowed);
        }
    }

    if !extension_matches(&file.name, &file.declared_type) {
        return Err(UploadError::ExtensionMismatch);
    }

    if !signature_matches(&file.declared_type, file.header()) {
        log::warn!(
            "⚠️ Firma de {} no coincide con {} (parece {:?})",
            file.name,
            file.declared_type,
            sniff_mime(file.header())
        );
        return Err(UploadError::SignatureMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    fn jpeg(name: &str, size: u64) -> SelectedFile {
        let mut bytes = vec![0u8; size as usize];
        bytes[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
        SelectedFile::new(name, "image/jpeg", bytes)
    }

    #[test]
    fn missing_file_fails_first() {
        assert_eq!(validate_file(None, &UploadOptions::new(2)), Err(UploadError::NoFile));
    }

    #[test]
    fn size_boundary_is_strictly_greater() {
        let options = UploadOptions::images(2);
        assert!(validate_file(Some(&jpeg("a.jpg", 2 * MB)), &options).is_ok());

        let err = validate_file(Some(&jpeg("a.jpg", 2 * MB + 1)), &options).unwrap_err();
        assert_eq!(err, UploadError::TooLarge { max_mb: 2 });
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn allow_list_checked_before_extension() {
        let options = UploadOptions::documents(5);
        let err = validate_file(Some(&jpeg("a.png", 10)), &options).unwrap_err();
        assert_eq!(err, UploadError::TypeNotAllowed);
    }

    #[test]
    fn extension_must_match_declared_type() {
        let err = validate_file(Some(&jpeg("foto.png", 10)), &UploadOptions::images(2)).unwrap_err();
        assert_eq!(err, UploadError::ExtensionMismatch);
    }

    #[test]
    fn png_bytes_declared_as_jpeg_are_rejected() {
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0; 32]);
        let spoofed = SelectedFile::new("foto.jpg", "image/jpeg", bytes);

        let err = validate_file(Some(&spoofed), &UploadOptions::images(2)).unwrap_err();
        assert_eq!(err, UploadError::SignatureMismatch);
    }

    #[test]
    fn unknown_types_skip_signature_check() {
        let csv = SelectedFile::new("datos.csv", "text/csv", b"a,b\n1,2\n".to_vec());
        assert!(validate_file(Some(&csv), &UploadOptions::new(1)).is_ok());
    }
}
