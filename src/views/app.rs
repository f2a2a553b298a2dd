// ============================================================================
// APP VIEW - selector de página según la ruta
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::state::{AppState, Route};
use crate::viewmodels::SessionViewModel;
use crate::views::{render_dashboard, render_login, render_register};

/// Renderizar la página activa. El dashboard pasa primero por el guard de sesión.
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    match state.get_route() {
        Route::Login => render_login(state),
        Route::Register => render_register(state),
        Route::Dashboard => {
            let now_ms = chrono::Utc::now().timestamp_millis();
            if SessionViewModel::new().guard(state, now_ms) {
                render_dashboard(state)
            } else {
                render_login(state)
            }
        }
    }
}
