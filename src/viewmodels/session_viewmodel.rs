// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Login / register / logout y el guard de sesión al montar páginas.
// Devuelve valores; las vistas actualizan el estado.
// ============================================================================

use crate::services::{
    perform_login, perform_logout, perform_register, ApiClient, BrowserTransport, HttpTransport,
    SessionStatus,
};
use crate::state::{AppState, Route};
use crate::utils::{BrowserStorage, KeyValueStore, LOGIN_FAILED_MESSAGE, REGISTER_FAILED_MESSAGE};

pub struct SessionViewModel<T = BrowserTransport, S = BrowserStorage> {
    api: ApiClient<T, S>,
}

impl SessionViewModel {
    pub fn new() -> Self {
        Self::with_client(ApiClient::new())
    }
}

impl Default for SessionViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport, S: KeyValueStore> SessionViewModel<T, S> {
    pub fn with_client(api: ApiClient<T, S>) -> Self {
        Self { api }
    }

    /// Login; si sale bien el token queda guardado y se devuelve el estado decodificado.
    /// Los errores son mensajes para el usuario.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionStatus, String> {
        match perform_login(&self.api, username, password).await {
            Ok(_) => Ok(self.check_session()),
            Err(e) => {
                log::error!("❌ [LOGIN] Error en login: {}", e);
                Err(e.user_message(LOGIN_FAILED_MESSAGE))
            }
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), String> {
        perform_register(&self.api, username, password)
            .await
            .map_err(|e| {
                log::error!("❌ [REGISTER] Error en registro: {}", e);
                e.user_message(REGISTER_FAILED_MESSAGE)
            })
    }

    /// Logout completo. Un fallo de storage se loguea, nunca es fatal.
    pub fn logout(&self) {
        if let Err(e) = perform_logout(&self.api) {
            log::error!("❌ [SESSION] Error limpiando sesión: {}", e);
        }
    }

    pub fn check_session(&self) -> SessionStatus {
        self.api.session().check_now()
    }

    pub fn check_session_at(&self, now_ms: i64) -> SessionStatus {
        self.api.session().check(now_ms)
    }

    /// Guard al montar: copia la sesión al estado, si no hay vuelve a login.
    /// No notifica; se llama durante el render.
    pub fn guard(&self, state: &AppState, now_ms: i64) -> bool {
        let status = self.check_session_at(now_ms);
        let authenticated = status.is_authenticated();
        state.auth.set_status(status);

        if !authenticated {
            log::info!("🔒 [SESSION] Sin sesión válida, redirigiendo a login");
            state.positions.clear();
            *state.route.borrow_mut() = Route::Login;
        }
        authenticated
    }
}
