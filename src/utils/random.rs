// ============================================================================
// FUENTES INYECTABLES - Aleatoriedad criptográfica y reloj
// ============================================================================

/// Fuente de bytes aleatorios (crypto.getRandomValues en el navegador)
pub trait RandomSource {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), String>;
}

/// Fuente del sistema vía getrandom
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<(), String> {
        getrandom::getrandom(buf).map_err(|e| format!("Error obteniendo bytes aleatorios: {}", e))
    }
}

/// Reloj en epoch ms
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
