// handlers/protected/auth/logout.rs - POST /api/logout handler

use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, FieldErrors, Message, Validate, ValidJson};

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub user: String,
}

impl Validate for LogoutRequest {
    fn validate(&self) -> Result<(), std::collections::HashMap<String, String>> {
        FieldErrors::new().require("user", &self.user).finish()
    }
}

/// POST /api/logout - Destroy the caller's session
///
/// Only the identity bound to the session may end it. A mismatching `user`
/// is refused with 403 and the session stays as it was; a store failure
/// while destroying is reported as 500 rather than swallowed.
pub async fn logout_post(
    auth: AuthUser,
    ValidJson(body): ValidJson<LogoutRequest>,
) -> ApiResult<Message> {
    if body.user != auth.user_name {
        tracing::warn!(
            session_user = %auth.user_name,
            requested = %body.user,
            "logout refused: identity mismatch"
        );
        return Err(ApiError::forbidden("Session does not belong to this user"));
    }

    auth.session.flush().await.map_err(|e| {
        tracing::error!(user = %auth.user_name, "failed to destroy session: {}", e);
        ApiError::internal_server_error("unable to logout user")
    })?;

    tracing::info!(user = %auth.user_name, "user logged out");
    Ok(ApiResponse::success(Message::new("logout success")))
}
