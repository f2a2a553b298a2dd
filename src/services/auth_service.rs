use crate::errors::{ApiError, StorageError};
use crate::models::{Credentials, ErrorBody, LoginResponse};
use crate::services::api_client::{ApiClient, RequestOptions};
use crate::services::transport::HttpTransport;
use crate::utils::{KeyValueStore, AUTH_LOGIN_PATH, AUTH_REGISTER_PATH};

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Login y guardar el token recibido. Devuelve el token.
pub async fn perform_login<T: HttpTransport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    username: &str,
    password: &str,
) -> Result<String, ApiError> {
    log::info!("🔐 [AUTH] Login para usuario: {}", username);

    let options = RequestOptions::post().json(&credentials(username, password))?;
    let response = api.request_public(AUTH_LOGIN_PATH, options).await?;

    // Body ilegible cuenta como vacío (igual que sin token)
    let login: LoginResponse = response.json().unwrap_or_default();
    let token = match login.access_token.filter(|t| !t.is_empty()) {
        Some(token) if response.ok() => token,
        _ => {
            log::warn!("⚠️ [AUTH] Login rechazado (HTTP {})", response.status);
            return Err(ApiError::Rejected {
                status: response.status,
                message: ErrorBody::from_body(&response.body).message(),
            });
        }
    };

    api.session().save(&token)?;

    match api.session().decode(&token) {
        Ok(claims) => log::debug!("🔍 [AUTH] Token payload: {:?}", claims),
        Err(e) => log::warn!("⚠️ [AUTH] No se pudo decodificar el payload del JWT: {}", e),
    }
    log::info!("✅ [AUTH] Login exitoso");

    Ok(token)
}

/// Registrar cuenta nueva. No hace login.
pub async fn perform_register<T: HttpTransport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    log::info!("📝 [AUTH] Registro de usuario: {}", username);

    let options = RequestOptions::post().json(&credentials(username, password))?;
    api.request_public(AUTH_REGISTER_PATH, options)
        .await?
        .error_for_status()?;

    log::info!("✅ [AUTH] Usuario registrado: {}", username);
    Ok(())
}

pub fn perform_logout<T: HttpTransport, S: KeyValueStore>(api: &ApiClient<T, S>) -> Result<(), StorageError> {
    log::info!("🚪 [AUTH] Logout");
    api.session().clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CONNECTION_ERROR_MESSAGE;
    use crate::services::session_store::test_tokens::token_for;
    use crate::services::testing::{client_with, MockTransport};
    use crate::services::transport::HttpMethod;
    use crate::utils::LOGIN_FAILED_MESSAGE;
    use futures::executor::block_on;

    #[test]
    fn login_saves_access_token() {
        let token = token_for("ana", "admin", 4_000_000_000);
        let transport = MockTransport::new();
        transport.push_status(201, &format!(r#"{{"accessToken":"{}"}}"#, token));
        let api = client_with(transport.clone());

        let returned = block_on(perform_login(&api, "ana", "secret")).unwrap();
        assert_eq!(returned, token);
        assert_eq!(api.session().read(), Some(token));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "http://backend.test/auth/login");
        assert_eq!(sent.header("Authorization"), None);
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"username": "ana", "password": "secret"}));
    }

    #[test]
    fn login_rejection_uses_backend_message() {
        let transport = MockTransport::new();
        transport.push_status(401, r#"{"message":"Wrong password","statusCode":401}"#);
        let api = client_with(transport);

        let err = block_on(perform_login(&api, "ana", "nope")).unwrap_err();
        assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), "Wrong password");
        assert_eq!(api.session().read(), None);
    }

    #[test]
    fn login_without_token_in_body_fails() {
        let transport = MockTransport::new();
        transport.push_status(200, r#"{"ok":true}"#);
        transport.push_status(500, "Internal Server Error");
        let api = client_with(transport);

        let err = block_on(perform_login(&api, "ana", "secret")).unwrap_err();
        assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), LOGIN_FAILED_MESSAGE);

        let err = block_on(perform_login(&api, "ana", "secret")).unwrap_err();
        assert_eq!(err, ApiError::Rejected { status: 500, message: None });
        assert_eq!(api.session().read(), None);
    }

    #[test]
    fn login_network_failure_is_connection_error() {
        let transport = MockTransport::new();
        transport.push_network_error("Failed to fetch");
        let api = client_with(transport);

        let err = block_on(perform_login(&api, "ana", "secret")).unwrap_err();
        assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), CONNECTION_ERROR_MESSAGE);
    }

    #[test]
    fn register_posts_credentials_without_logging_in() {
        let transport = MockTransport::new();
        transport.push_status(201, r#"{"id":3,"username":"bob"}"#);
        let api = client_with(transport.clone());

        block_on(perform_register(&api, "bob", "pw")).unwrap();
        assert_eq!(transport.last_request().unwrap().url, "http://backend.test/auth/register");
        assert_eq!(api.session().read(), None);
    }

    #[test]
    fn register_rejection_keeps_validation_messages() {
        let transport = MockTransport::new();
        transport.push_status(400, r#"{"message":["username must be longer","password is too weak"]}"#);
        let api = client_with(transport);

        let err = block_on(perform_register(&api, "b", "pw")).unwrap_err();
        assert_eq!(
            err.user_message("Registration failed"),
            "username must be longer, password is too weak"
        );
    }

    #[test]
    fn logout_clears_token() {
        let api = client_with(MockTransport::new());
        api.session().save("a.b.c").unwrap();
        perform_logout(&api).unwrap();
        assert_eq!(api.session().read(), None);
    }
}
