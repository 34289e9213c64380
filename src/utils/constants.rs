/// TTL de las páginas públicas (noticias, agenda)
pub const PUBLIC_CONTENT_TTL_MS: i64 = 5 * 60 * 1000;

/// TTL de contenido que casi no cambia (autoridades, estructura de gobierno)
pub const STATIC_CONTENT_TTL_MS: i64 = 30 * 60 * 1000;
