use crate::errors::ApiError;
use crate::models::{Position, PositionPayload};
use crate::services::api_client::{ApiClient, RequestOptions};
use crate::services::transport::HttpTransport;
use crate::utils::{KeyValueStore, POSITIONS_PATH};

fn position_path(id: i64) -> String {
    format!("{}/{}", POSITIONS_PATH, id)
}

pub async fn fetch_positions<T: HttpTransport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
) -> Result<Vec<Position>, ApiError> {
    let response = api
        .request(POSITIONS_PATH, RequestOptions::get())
        .await?
        .error_for_status()?;
    let positions: Vec<Position> = response.json()?;
    log::info!("📋 [POSITIONS] {} posiciones cargadas", positions.len());
    Ok(positions)
}

pub async fn create_position<T: HttpTransport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    payload: &PositionPayload,
) -> Result<Position, ApiError> {
    let options = RequestOptions::post().json(payload)?;
    let created: Position = api
        .request(POSITIONS_PATH, options)
        .await?
        .error_for_status()?
        .json()?;
    log::info!("✅ [POSITIONS] Posición creada: {} ({})", created.position_code, created.id);
    Ok(created)
}

pub async fn update_position<T: HttpTransport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    id: i64,
    payload: &PositionPayload,
) -> Result<Position, ApiError> {
    let options = RequestOptions::put().json(payload)?;
    let updated: Position = api
        .request(&position_path(id), options)
        .await?
        .error_for_status()?
        .json()?;
    log::info!("✅ [POSITIONS] Posición actualizada: {}", updated.id);
    Ok(updated)
}

pub async fn delete_position<T: HttpTransport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    id: i64,
) -> Result<(), ApiError> {
    api.request(&position_path(id), RequestOptions::delete())
        .await?
        .error_for_status()?;
    log::info!("🗑️ [POSITIONS] Posición eliminada: {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{client_with, MockTransport};
    use crate::services::transport::HttpMethod;
    use futures::executor::block_on;

    fn payload(code: &str, name: &str) -> PositionPayload {
        PositionPayload { position_code: code.to_string(), position_name: name.to_string() }
    }

    #[test]
    fn fetch_parses_list_with_optional_timestamps() {
        let transport = MockTransport::new();
        transport.push_status(
            200,
            r#"[{"id":1,"position_code":"P1","position_name":"Engineer","created_at":"2025-01-01T00:00:00Z"},
                {"id":2,"position_code":"P2","position_name":"Manager"}]"#,
        );
        let api = client_with(transport.clone());

        let positions = block_on(fetch_positions(&api)).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].created_at.as_deref(), Some("2025-01-01T00:00:00Z"));
        assert_eq!(positions[1].updated_at, None);
        assert_eq!(transport.last_request().unwrap().url, "http://backend.test/positions");
    }

    #[test]
    fn create_posts_snake_case_body() {
        let transport = MockTransport::new();
        transport.push_status(201, r#"{"id":9,"position_code":"P1","position_name":"Engineer"}"#);
        let api = client_with(transport.clone());

        let created = block_on(create_position(&api, &payload("P1", "Engineer"))).unwrap();
        assert_eq!(created.id, 9);

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"position_code": "P1", "position_name": "Engineer"}));
    }

    #[test]
    fn update_and_delete_target_the_id() {
        let transport = MockTransport::new();
        transport.push_status(200, r#"{"id":4,"position_code":"P4","position_name":"Lead"}"#);
        transport.push_status(200, "");
        let api = client_with(transport.clone());

        block_on(update_position(&api, 4, &payload("P4", "Lead"))).unwrap();
        block_on(delete_position(&api, 4)).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].url, "http://backend.test/positions/4");
        assert_eq!(sent[1].method, HttpMethod::Delete);
        assert_eq!(sent[1].url, "http://backend.test/positions/4");
        assert_eq!(sent[1].body, None);
    }

    #[test]
    fn non_2xx_is_rejected() {
        let transport = MockTransport::new();
        transport.push_status(401, r#"{"message":"Unauthorized"}"#);
        let api = client_with(transport);

        let err = block_on(fetch_positions(&api)).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn malformed_list_is_parse_error() {
        let transport = MockTransport::new();
        transport.push_status(200, r#"{"items":[]}"#);
        let api = client_with(transport);

        assert!(matches!(block_on(fetch_positions(&api)), Err(ApiError::Parse(_))));
    }
}
