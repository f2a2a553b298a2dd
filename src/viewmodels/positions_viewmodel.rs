// ============================================================================
// POSITIONS VIEWMODEL - CRUD sobre /positions
// ============================================================================

use crate::errors::ApiError;
use crate::services::{
    create_position, delete_position, fetch_positions, update_position, ApiClient, BrowserTransport,
    HttpTransport,
};
use crate::state::{AppState, PositionChange};
use crate::utils::{
    BrowserStorage, KeyValueStore, POSITIONS_LOAD_FAILED_MESSAGE, POSITION_CREATE_FAILED_MESSAGE,
    POSITION_DELETE_FAILED_MESSAGE, POSITION_UPDATE_FAILED_MESSAGE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionAction {
    Load,
    /// Crear o actualizar, según el `editing` del formulario
    Submit,
    Delete(i64),
}

pub struct PositionsViewModel<T = BrowserTransport, S = BrowserStorage> {
    api: ApiClient<T, S>,
}

impl PositionsViewModel {
    pub fn new() -> Self {
        Self::with_client(ApiClient::new())
    }
}

impl Default for PositionsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport, S: KeyValueStore> PositionsViewModel<T, S> {
    pub fn with_client(api: ApiClient<T, S>) -> Self {
        Self { api }
    }

    async fn run(&self, action: PositionAction, state: &AppState) -> Result<PositionChange, (ApiError, &'static str)> {
        match action {
            PositionAction::Load => fetch_positions(&self.api)
                .await
                .map(PositionChange::Loaded)
                .map_err(|e| (e, POSITIONS_LOAD_FAILED_MESSAGE)),
            PositionAction::Submit => {
                let form = state.positions.get_form();
                let payload = form.payload();
                match form.editing {
                    Some(id) => update_position(&self.api, id, &payload)
                        .await
                        .map(PositionChange::Updated)
                        .map_err(|e| (e, POSITION_UPDATE_FAILED_MESSAGE)),
                    None => create_position(&self.api, &payload)
                        .await
                        .map(PositionChange::Created)
                        .map_err(|e| (e, POSITION_CREATE_FAILED_MESSAGE)),
                }
            }
            PositionAction::Delete(id) => delete_position(&self.api, id)
                .await
                .map(|_| PositionChange::Deleted(id))
                .map_err(|e| (e, POSITION_DELETE_FAILED_MESSAGE)),
        }
    }

    /// Ejecutar la llamada, aplicar el resultado al snapshot y notificar.
    /// Un 401 cierra la sesión y vuelve a login.
    pub async fn dispatch(&self, action: PositionAction, state: &AppState) {
        state.positions.set_loading(true);

        match self.run(action, state).await {
            Ok(change) => state.positions.apply(change),
            Err((e, _)) if e.is_unauthorized() => {
                log::warn!("🔒 [POSITIONS] 401 en {:?}, cerrando sesión", action);
                if let Err(clear_err) = self.api.session().clear() {
                    log::error!("❌ [POSITIONS] Error limpiando token: {}", clear_err);
                }
                state.positions.set_loading(false);
                state.reset_to_login();
                return;
            }
            Err((e, fallback)) => {
                log::error!("❌ [POSITIONS] {:?} falló: {}", action, e);
                state.positions.set_error(Some(e.user_message(fallback)));
            }
        }

        state.positions.set_loading(false);
        state.notify_subscribers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{client_with, MockTransport};
    use crate::services::HttpMethod;
    use crate::state::Route;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;

    fn setup(transport: &MockTransport) -> (PositionsViewModel<MockTransport, MemoryStorage>, AppState) {
        let api = client_with(transport.clone());
        api.session().save("a.b.c").unwrap();
        let state = AppState::new();
        *state.route.borrow_mut() = Route::Dashboard;
        (PositionsViewModel::with_client(api), state)
    }

    const SEED: &str = r#"[{"id":1,"position_code":"P0","position_name":"Intern"},
                           {"id":2,"position_code":"P9","position_name":"CTO"}]"#;

    #[test]
    fn create_then_delete_touches_exactly_one_row() {
        let transport = MockTransport::new();
        transport.push_status(200, SEED);
        transport.push_status(201, r#"{"id":10,"position_code":"P1","position_name":"Engineer"}"#);
        transport.push_status(200, "");
        let (vm, state) = setup(&transport);

        block_on(vm.dispatch(PositionAction::Load, &state));
        assert_eq!(state.positions.get_items().len(), 2);

        state.positions.set_form_code("P1".to_string());
        state.positions.set_form_name("Engineer".to_string());
        block_on(vm.dispatch(PositionAction::Submit, &state));

        let items = state.positions.get_items();
        assert_eq!(items.len(), 3);
        let created: Vec<_> = items.iter().filter(|p| p.position_code == "P1").collect();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].position_name, "Engineer");
        assert_eq!(state.positions.get_form().code, "");

        block_on(vm.dispatch(PositionAction::Delete(10), &state));
        let ids: Vec<i64> = state.positions.get_items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(transport.last_request().unwrap().url, "http://backend.test/positions/10");
    }

    #[test]
    fn submit_while_editing_updates() {
        let transport = MockTransport::new();
        transport.push_status(200, SEED);
        transport.push_status(200, r#"{"id":2,"position_code":"P9","position_name":"CEO"}"#);
        let (vm, state) = setup(&transport);

        block_on(vm.dispatch(PositionAction::Load, &state));
        state.positions.start_edit(2);
        state.positions.set_form_name("CEO".to_string());
        block_on(vm.dispatch(PositionAction::Submit, &state));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.url, "http://backend.test/positions/2");
        assert_eq!(state.positions.get_items()[1].position_name, "CEO");
        assert!(!state.positions.get_form().is_editing());
    }

    #[test]
    fn failed_mutation_keeps_snapshot_and_reports() {
        let transport = MockTransport::new();
        transport.push_status(200, SEED);
        transport.push_status(500, "{}");
        let (vm, state) = setup(&transport);

        block_on(vm.dispatch(PositionAction::Load, &state));
        block_on(vm.dispatch(PositionAction::Delete(1), &state));

        assert_eq!(state.positions.get_items().len(), 2);
        assert_eq!(state.positions.get_error().as_deref(), Some(POSITION_DELETE_FAILED_MESSAGE));
        assert!(!state.positions.is_loading());
    }

    #[test]
    fn unauthorized_ends_session() {
        let transport = MockTransport::new();
        transport.push_status(401, r#"{"message":"Unauthorized"}"#);
        let (vm, state) = setup(&transport);

        block_on(vm.dispatch(PositionAction::Load, &state));

        assert_eq!(state.get_route(), Route::Login);
        assert_eq!(vm.api.session().read(), None);
        assert!(!state.positions.is_loading());
    }

    #[test]
    fn network_failure_shows_connection_message() {
        let transport = MockTransport::new();
        transport.push_network_error("Failed to fetch");
        let (vm, state) = setup(&transport);

        block_on(vm.dispatch(PositionAction::Load, &state));
        assert_eq!(
            state.positions.get_error().as_deref(),
            Some(crate::errors::CONNECTION_ERROR_MESSAGE)
        );
        assert_eq!(state.get_route(), Route::Dashboard);
    }
}
