pub mod auth;
pub mod json;
pub mod response;
pub mod session;

pub use auth::AuthUser;
pub use json::{FieldErrors, Validate, ValidJson};
pub use response::{ApiResponse, ApiResult, Message};
pub use session::{establish_session, session_layer};
