// ============================================================================
// FRESHNESS GATE - Stale-while-revalidate por consumidor montado
// ============================================================================
// Idle -> Dispatched (needs_fetch y guard libre) -> Idle (cleanup)
// Cleanup = desmontaje o cambio de dependencias (data_key, needs_fetch)
// ============================================================================

use std::ops::{Deref, DerefMut};
use crate::config::CONFIG;
use crate::models::{DataKey, Freshness};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Idle,
    Dispatched,
}

/// Resultado de un check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateCheck {
    pub freshness: Freshness,
    pub dispatched: bool,
}

#[derive(Debug)]
pub struct FreshnessGate {
    data_key: DataKey,
    ttl_ms: i64,
    phase: GatePhase,
    /// needs_fetch del último check (dependencia del efecto)
    last_needs_fetch: Option<bool>,
}

impl FreshnessGate {
    pub fn new(data_key: DataKey, ttl_ms: i64) -> Result<Self, String> {
        if ttl_ms <= 0 {
            return Err(format!("TTL inválido para '{}': {} ms", data_key, ttl_ms));
        }
        Ok(Self {
            data_key,
            ttl_ms,
            phase: GatePhase::Idle,
            last_needs_fetch: None,
        })
    }

    /// Igual que `new`, pero un TTL inválido cae al TTL por defecto de la config
    pub fn with_fallback_ttl(data_key: DataKey, ttl_ms: i64) -> Self {
        let ttl_ms = if ttl_ms > 0 {
            ttl_ms
        } else {
            log::warn!(
                "⚠️ TTL inválido para '{}' ({} ms), se usa {} ms",
                data_key,
                ttl_ms,
                CONFIG.cache_config.default_ttl_ms
            );
            CONFIG.cache_config.default_ttl_ms
        };
        Self {
            data_key,
            ttl_ms,
            phase: GatePhase::Idle,
            last_needs_fetch: None,
        }
    }

    pub fn data_key(&self) -> &DataKey {
        &self.data_key
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Evaluación pura, sin tocar el guard
    pub fn evaluate(&self, last_fetched: i64, now: i64, has_data: bool) -> Freshness {
        Freshness::evaluate(last_fetched, now, self.ttl_ms, has_data)
    }

    /// Evalúa y, si hace falta, despacha el fetch una sola vez por ventana
    pub fn check<F>(&mut self, last_fetched: i64, now: i64, has_data: bool, dispatch: F) -> GateCheck
    where
        F: FnOnce(),
    {
        let freshness = self.evaluate(last_fetched, now, has_data);

        if self.last_needs_fetch != Some(freshness.needs_fetch) {
            self.release();
            self.last_needs_fetch = Some(freshness.needs_fetch);
        }

        let dispatched = freshness.needs_fetch && self.phase == GatePhase::Idle;
        if dispatched {
            self.phase = GatePhase::Dispatched;
            log::debug!(
                "📡 Fetch despachado para '{}' (lastFetched={})",
                self.data_key,
                last_fetched
            );
            dispatch();
        }

        GateCheck { freshness, dispatched }
    }

    /// Cambiar la clave es un cambio de dependencias: libera el guard
    pub fn set_data_key(&mut self, data_key: DataKey) {
        if data_key != self.data_key {
            self.data_key = data_key;
            self.release();
            self.last_needs_fetch = None;
        }
    }

    pub fn set_ttl(&mut self, ttl_ms: i64) {
        if ttl_ms > 0 {
            self.ttl_ms = ttl_ms;
        }
    }

    /// Cleanup: vuelve a Idle
    pub fn release(&mut self) {
        self.phase = GatePhase::Idle;
    }

    /// Montaje con teardown automático al salir del scope
    pub fn mount(&mut self) -> MountedGate<'_> {
        self.last_needs_fetch = None;
        MountedGate { gate: self }
    }
}

/// Consumidor montado; al soltarse libera el guard (desmontaje)
pub struct MountedGate<'a> {
    gate: &'a mut FreshnessGate,
}

impl Deref for MountedGate<'_> {
    type Target = FreshnessGate;

    fn deref(&self) -> &Self::Target {
        self.gate
    }
}

impl DerefMut for MountedGate<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.gate
    }
}

impl Drop for MountedGate<'_> {
    fn drop(&mut self) {
        self.gate.release();
        self.gate.last_needs_fetch = None;
    }
}
