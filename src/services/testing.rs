//! Test doubles for the service layer.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::services::api_client::ApiClient;
use crate::services::session_store::SessionStore;
use crate::services::transport::{HttpTransport, OutboundRequest, RawResponse};
use crate::utils::MemoryStorage;

/// Records every request and replays queued responses in order.
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Rc<RefCell<Vec<OutboundRequest>>>,
    responses: Rc<RefCell<VecDeque<Result<RawResponse, ApiError>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_status(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(RawResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
        }));
    }

    pub fn push_network_error(&self, reason: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<OutboundRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl HttpTransport for MockTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}

pub type TestClient = ApiClient<MockTransport, MemoryStorage>;

pub fn test_config() -> AppConfig {
    AppConfig {
        backend_url_development: "http://backend.test".to_string(),
        ..AppConfig::default()
    }
}

pub fn client_with(transport: MockTransport) -> TestClient {
    ApiClient::with_parts(test_config(), transport, SessionStore::new(MemoryStorage::new()))
}
