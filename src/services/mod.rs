pub mod transport;
pub mod session_store;
pub mod api_client;
pub mod auth_service;
pub mod position_service;

#[cfg(test)]
pub(crate) mod testing;

pub use transport::{BrowserTransport, HttpMethod, HttpTransport, OutboundRequest, RawResponse};
pub use session_store::{SessionStatus, SessionStore};
pub use api_client::{ApiClient, RequestOptions};
pub use auth_service::*;
pub use position_service::*;
