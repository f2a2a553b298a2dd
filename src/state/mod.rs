// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod auth_state;
pub mod positions_state;
pub mod app_state;

pub use auth_state::*;
pub use positions_state::*;
pub use app_state::*;
