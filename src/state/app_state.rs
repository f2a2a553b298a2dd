// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::state::{AuthState, PositionsState};

/// Página activa
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Register,
    Dashboard,
}

/// Estado global de la aplicación
#[derive(Clone, Default)]
pub struct AppState {
    pub route: Rc<RefCell<Route>>,
    pub auth: AuthState,
    pub positions: PositionsState,

    // Reactivity: callbacks para notificar cambios
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_route(&self) -> Route {
        *self.route.borrow()
    }

    /// Cambiar de página y notificar
    pub fn navigate(&self, route: Route) {
        log::info!("🧭 [STATE] Navegando a {:?}", route);
        *self.route.borrow_mut() = route;
        self.notify_subscribers();
    }

    /// Transición a deslogueado: limpiar claims y snapshot, mostrar login
    pub fn reset_to_login(&self) {
        self.auth.logout();
        self.positions.clear();
        self.navigate(Route::Login);
    }

    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify_subscribers(&self) {
        // Clonar primero: un callback puede suscribirse sin doble borrow
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}
