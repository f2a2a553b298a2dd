// ============================================================================
// AUTH STATE - Estado de autenticación en memoria
// ============================================================================
// Copia del último check de sesión, para renderizar. La fuente de verdad
// sigue siendo el SessionStore.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::Claims;
use crate::services::SessionStatus;

#[derive(Clone, Default)]
pub struct AuthState {
    pub status: Rc<RefCell<SessionStatus>>,
}

impl AuthState {
    pub fn set_status(&self, status: SessionStatus) {
        *self.status.borrow_mut() = status;
    }

    pub fn get_claims(&self) -> Option<Claims> {
        self.status.borrow().claims().cloned()
    }

    /// Logout - limpiar todo
    pub fn logout(&self) {
        self.set_status(SessionStatus::Unauthenticated);
    }
}
