pub mod auth;
pub mod claims;
pub mod position;

pub use auth::{Credentials, ErrorBody, LoginResponse};
pub use claims::{Claims, SubjectId};
pub use position::{Position, PositionForm, PositionPayload};
