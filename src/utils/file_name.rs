// ============================================================================
// NOMBRES DE ARCHIVO - Saneado y nombres únicos para el storage
// ============================================================================

use crate::utils::random::RandomSource;

/// Bytes aleatorios del sufijo de nombres generados
pub const RANDOM_SUFFIX_BYTES: usize = 6;

/// Quita separadores de ruta y `..`, y reemplaza cualquier carácter fuera de
/// `[a-zA-Z0-9._-]` por `_`. El resultado nunca contiene `..`.
pub fn sanitize_file_name(name: &str) -> String {
    // separadores primero: "./." no debe terminar en ".."
    let mut flat: String = name.chars().filter(|c| *c != '/' && *c != '\\').collect();
    while flat.contains("..") {
        flat = flat.replace("..", "");
    }

    flat
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Saneado de una carpeta destino: cada segmento por separado, sin vacíos
pub fn sanitize_folder(folder: &str) -> String {
    folder
        .split(['/', '\\'])
        .map(sanitize_file_name)
        .filter(|segment| !segment.is_empty() && segment != "." && segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// `{epoch-ms}-{hex aleatorio}.{ext}`
pub fn unique_file_name(now_ms: i64, ext: &str, random: &dyn RandomSource) -> Result<String, String> {
    let mut bytes = [0u8; RANDOM_SUFFIX_BYTES];
    random.fill_bytes(&mut bytes)?;

    let suffix: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

    if ext.is_empty() {
        Ok(format!("{}-{}", now_ms, suffix))
    } else {
        Ok(format!("{}-{}.{}", now_ms, suffix, ext))
    }
}

/// Ruta final dentro del bucket
pub fn storage_path(folder: Option<&str>, file_name: &str) -> String {
    match folder.map(sanitize_folder).filter(|f| !f.is_empty()) {
        Some(folder) => format!("{}/{}", folder, file_name),
        None => file_name.to_string(),
    }
}
