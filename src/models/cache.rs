// ============================================================================
// FRESCURA DE CACHÉ - Resultado de evaluar lastFetched contra un TTL
// ============================================================================

/// Estado de UI derivado de la frescura de los datos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Sin datos y nunca pedidos: mostrar skeleton
    FirstLoad,
    /// Datos dentro del TTL
    Fresh,
    /// Datos en pantalla pero viejos: refrescando en segundo plano
    BackgroundRefresh,
    /// Sin datos pero ya pedidos antes (respuesta vacía o refetch sin datos)
    Empty,
}

/// Evaluación de frescura para una clave en un instante dado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    pub last_fetched: i64,
    pub has_data: bool,
    pub is_stale: bool,
    pub needs_fetch: bool,
    pub is_first_load: bool,
    pub is_background_refresh: bool,
}

impl Freshness {
    /// `last_fetched == 0` significa "nunca pedido"
    pub fn evaluate(last_fetched: i64, now: i64, ttl_ms: i64, has_data: bool) -> Self {
        let is_stale = now - last_fetched > ttl_ms;
        let needs_fetch = last_fetched == 0 || is_stale;

        Self {
            last_fetched,
            has_data,
            is_stale,
            needs_fetch,
            is_first_load: !has_data && last_fetched == 0,
            is_background_refresh: has_data && is_stale,
        }
    }

    pub fn status(&self) -> CacheStatus {
        if self.is_first_load {
            CacheStatus::FirstLoad
        } else if self.is_background_refresh {
            CacheStatus::BackgroundRefresh
        } else if !self.has_data {
            CacheStatus::Empty
        } else {
            CacheStatus::Fresh
        }
    }

    /// Milisegundos hasta que los datos dejen de ser frescos (None si ya hay que pedirlos)
    pub fn remaining_ms(&self, now: i64, ttl_ms: i64) -> Option<i64> {
        if self.needs_fetch {
            return None;
        }
        Some(self.last_fetched + ttl_ms - now + 1)
    }
}
