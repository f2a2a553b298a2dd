// ============================================================================
// TRANSPORT - único punto que habla con la red
// ============================================================================

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use crate::errors::ApiError;
use crate::models::ErrorBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Request ya resuelto, listo para el transport
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Buscar header sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Respuesta tal como llegó, sin interpretar
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Un status no-2xx se convierte en `ApiError::Rejected` con el `message` del body
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.ok() {
            Ok(self)
        } else {
            Err(ApiError::Rejected {
                status: self.status,
                message: ErrorBody::from_body(&self.body).message(),
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError>;
}

/// `fetch` vía gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl HttpTransport for BrowserTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("⚠️ [HTTP] {} {}: no se pudo leer el body: {}", request.method.as_str(), request.url, e);
                String::new()
            }
        };

        log::debug!("🌐 [HTTP] {} {} -> {}", request.method.as_str(), request.url, status);
        Ok(RawResponse { status, status_text, body })
    }
}
