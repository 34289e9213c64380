// ============================================================================
// STATE MODULE - Estado compartido con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod fetch_registry;
pub mod freshness_gate;
pub mod upload_state;
pub mod app_state;

pub use reactivity::*;
pub use fetch_registry::*;
pub use freshness_gate::*;
pub use upload_state::*;
pub use app_state::*;
