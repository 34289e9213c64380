// ============================================================================
// PORTAL MUNICIPAL - Cache de contenido público y subida de archivos
// ============================================================================
// - Models: claves de datos, frescura, opciones de subida
// - State: FetchRegistry + FreshnessGate (stale-while-revalidate), UploadState
// - Services: SOLO comunicación (REST, storage) + pipeline de subida
// - Hooks / Components: integración con Yew
// ============================================================================

pub mod config;
pub mod models;
pub mod state;
pub mod stores;
pub mod services;
pub mod hooks;
pub mod components;
pub mod utils;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Inicialización del módulo WASM: panic hook + logging según config
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::CONFIG.log_level()));
    log::info!(
        "🚀 Portal municipal inicializado (entorno: {})",
        config::CONFIG.environment
    );
    if !config::CONFIG.is_production() {
        log::debug!("⚙️ Config: {:?}", *config::CONFIG);
    }
    Ok(())
}
