// ============================================================================
// APP - Aplicación principal
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, release_listeners, set_inner_html};
use crate::state::{AppState, Route};
use crate::viewmodels::{PositionAction, PositionsViewModel, SessionViewModel};
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Restaurar sesión desde storage si el token sigue vigente
        let status = SessionViewModel::new().check_session();
        if status.is_authenticated() {
            log::info!("💾 [APP] Sesión encontrada en storage, restaurando...");
            state.auth.set_status(status);
            enter_dashboard(&state);
        }

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        state.subscribe_to_changes(move || {
            // Usar gloo_timers para batchear múltiples updates
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            }).forget();
        });

        Ok(Self { state, root })
    }

    /// Renderizar aplicación (re-render completo)
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] App::render() ruta={:?}", self.state.get_route());
        set_inner_html(&self.root, "");
        let released = release_listeners();
        log::debug!("🧹 [APP] {} handlers liberados", released);
        let app_view = render_app(&self.state)?;
        append_child(&self.root, &app_view)
    }
}

/// Ir al dashboard y cargar la lista de posiciones
pub fn enter_dashboard(state: &AppState) {
    state.navigate(Route::Dashboard);
    let state = state.clone();
    spawn_local(async move {
        PositionsViewModel::new().dispatch(PositionAction::Load, &state).await;
    });
}
