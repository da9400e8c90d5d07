// handlers/public/auth/signin.rs - POST /api/signin handler

use axum::extract::State;
use tower_sessions::Session;

use super::{Credentials, SessionInfo};
use crate::auth;
use crate::error::ApiError;
use crate::middleware::{establish_session, ApiResponse, ApiResult, ValidJson};
use crate::state::AppState;

/// POST /api/signin - Verify credentials and open a session
///
/// - 201 `{id, user}` with an id different from any earlier one
/// - 404 when the user does not exist
/// - 401 on a wrong password
/// - 500 when the stored hash cannot be checked
pub async fn signin_post(
    State(state): State<AppState>,
    session: Session,
    ValidJson(body): ValidJson<Credentials>,
) -> ApiResult<SessionInfo> {
    let Some(user) = state.store.find_user(&body.username).await? else {
        tracing::info!(user = %body.username, "signin rejected: unknown user");
        return Err(ApiError::not_found(format!(
            "User with username: {} does not exist",
            body.username
        )));
    };

    if !auth::spawn_verify(body.password, user.password.clone()).await? {
        tracing::warn!(user = %user.user_name, "signin rejected: wrong password");
        return Err(ApiError::unauthorized("Wrong password"));
    }

    let id = establish_session(&session, &user.user_name).await?;
    tracing::info!(user = %user.user_name, "user signed in");

    Ok(ApiResponse::created(SessionInfo {
        id,
        user: user.user_name,
    }))
}
