// ============================================================================
// API CLIENT - gateway para requests autenticados
// ============================================================================
// Inyecta `Content-Type: application/json` y `Authorization: Bearer <token>`
// en cada llamada. El token se lee del SessionStore en cada request.
// La respuesta se devuelve tal cual: sin chequeo de status, reintentos ni refresh.
// ============================================================================

use serde::Serialize;
use crate::config::{AppConfig, CONFIG};
use crate::errors::ApiError;
use crate::services::session_store::SessionStore;
use crate::services::transport::{BrowserTransport, HttpMethod, HttpTransport, OutboundRequest, RawResponse};
use crate::utils::{BrowserStorage, KeyValueStore};

/// Opciones del llamador: método, headers extra, body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self { method, ..Self::default() }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn json<B: Serialize>(self, body: &B) -> Result<Self, ApiError> {
        let json = serde_json::to_string(body)?;
        Ok(self.body(json))
    }
}

/// Primero los defaults; un header del llamador reemplaza al default del mismo nombre
fn merge_headers(defaults: Vec<(String, String)>, overrides: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut merged = defaults;
    for (name, value) in overrides {
        match merged.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(&name)) {
            Some(existing) => existing.1 = value,
            None => merged.push((name, value)),
        }
    }
    merged
}

/// Gateway - solo comunicación HTTP (stateless, el token vive en el SessionStore)
#[derive(Clone)]
pub struct ApiClient<T = BrowserTransport, S = BrowserStorage> {
    config: AppConfig,
    transport: T,
    session: SessionStore<S>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_parts(CONFIG.clone(), BrowserTransport, SessionStore::browser())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport, S: KeyValueStore> ApiClient<T, S> {
    pub fn with_parts(config: AppConfig, transport: T, session: SessionStore<S>) -> Self {
        Self { config, transport, session }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Resolver URL y headers de una llamada autenticada.
    /// Sin token guardado el header se envía igual, como `Bearer null`.
    pub fn prepare(&self, path: &str, options: RequestOptions) -> OutboundRequest {
        let token = self.session.read();
        let authorization = format!("Bearer {}", token.as_deref().unwrap_or("null"));
        let defaults = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), authorization),
        ];

        OutboundRequest {
            method: options.method,
            url: self.config.endpoint(path),
            headers: merge_headers(defaults, options.headers),
            body: options.body,
        }
    }

    /// Igual que `prepare` pero sin credenciales (login / register)
    pub fn prepare_public(&self, path: &str, options: RequestOptions) -> OutboundRequest {
        let defaults = vec![("Content-Type".to_string(), "application/json".to_string())];

        OutboundRequest {
            method: options.method,
            url: self.config.endpoint(path),
            headers: merge_headers(defaults, options.headers),
            body: options.body,
        }
    }

    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<RawResponse, ApiError> {
        let request = self.prepare(path, options);
        log::debug!("🔐 [API] {} {}", request.method.as_str(), request.url);
        self.transport.send(request).await
    }

    pub async fn request_public(&self, path: &str, options: RequestOptions) -> Result<RawResponse, ApiError> {
        let request = self.prepare_public(path, options);
        log::debug!("🌐 [API] {} {}", request.method.as_str(), request.url);
        self.transport.send(request).await
    }
}
