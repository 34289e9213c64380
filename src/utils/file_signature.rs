// ============================================================================
// FIRMAS BINARIAS (magic bytes) Y EXTENSIONES POR TIPO MIME
// ============================================================================

/// Tipo MIME -> prefijos de bytes aceptados
pub const SIGNATURES: &[(&str, &[&[u8]])] = &[
    ("image/jpeg", &[&[0xFF, 0xD8, 0xFF]]),
    ("image/png", &[&[0x89, 0x50, 0x4E, 0x47]]),
    // Contenedor RIFF
    ("image/webp", &[&[0x52, 0x49, 0x46, 0x46]]),
    // %PDF
    ("application/pdf", &[&[0x25, 0x50, 0x44, 0x46]]),
];

/// Tipo MIME -> extensiones convencionales
pub const EXTENSIONS: &[(&str, &[&str])] = &[
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/webp", &["webp"]),
    ("image/gif", &["gif"]),
    ("image/svg+xml", &["svg"]),
    ("application/pdf", &["pdf"]),
    ("application/msword", &["doc"]),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &["docx"],
    ),
    ("application/vnd.ms-excel", &["xls"]),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &["xlsx"],
    ),
    ("text/csv", &["csv"]),
    ("text/plain", &["txt"]),
];

/// Bytes que se leen para comprobar la firma
pub const HEADER_LEN: usize = 8;

pub fn signatures_for(mime: &str) -> Option<&'static [&'static [u8]]> {
    SIGNATURES
        .iter()
        .find(|(known, _)| *known == mime)
        .map(|(_, sigs)| *sigs)
}

pub fn extensions_for(mime: &str) -> Option<&'static [&'static str]> {
    EXTENSIONS
        .iter()
        .find(|(known, _)| *known == mime)
        .map(|(_, exts)| *exts)
}

/// Extensión en minúsculas, sin punto
pub fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Extensión preferida para un tipo MIME ("image/jpeg" -> "jpg")
pub fn preferred_extension(mime: &str) -> Option<&'static str> {
    extensions_for(mime).and_then(|exts| exts.first().copied())
}

/// true si la extensión del nombre corresponde al MIME declarado.
/// MIME sin extensiones registradas: no se afirma nada.
pub fn extension_matches(file_name: &str, mime: &str) -> bool {
    let Some(expected) = extensions_for(mime) else {
        return true;
    };
    match extension_of(file_name) {
        Some(ext) => expected.contains(&ext.as_str()),
        None => false,
    }
}

/// true si la cabecera corresponde al MIME declarado.
/// MIME sin firma registrada: pasa sin comprobación.
pub fn signature_matches(mime: &str, header: &[u8]) -> bool {
    let header = &header[..header.len().min(HEADER_LEN)];
    match signatures_for(mime) {
        Some(signatures) => signatures.iter().any(|sig| header.starts_with(sig)),
        None => true,
    }
}

/// Tipo detectado a partir de los bytes, si alguno coincide
pub fn sniff_mime(header: &[u8]) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|(_, sigs)| sigs.iter().any(|sig| header.starts_with(sig)))
        .map(|(mime, _)| *mime)
}
