// handlers/public/auth/signup.rs - POST /api/signup handler

use axum::extract::State;
use tower_sessions::Session;

use super::{Credentials, SessionInfo};
use crate::auth;
use crate::database::models::DEFAULT_COLLECTIONS;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{establish_session, ApiResponse, ApiResult, ValidJson};
use crate::state::AppState;

const USERNAME_TAKEN: &str = "Username is already taken";

/// POST /api/signup - Create an account and sign it in
///
/// Creates the user with the `recommended` and `bestsellers` collections,
/// then binds the new identity to a regenerated session.
///
/// - 201 `{id, user}`
/// - 409 when the username exists (no second row is created)
/// - 500 when hashing fails
pub async fn signup_post(
    State(state): State<AppState>,
    session: Session,
    ValidJson(body): ValidJson<Credentials>,
) -> ApiResult<SessionInfo> {
    if state.store.find_user(&body.username).await?.is_some() {
        tracing::info!(user = %body.username, "signup rejected: username taken");
        return Err(ApiError::conflict(USERNAME_TAKEN));
    }

    let hash = auth::spawn_hash(body.password).await?;

    // The unique constraint still decides when two signups race.
    let user = state
        .store
        .create_account(&body.username, &hash, &DEFAULT_COLLECTIONS)
        .await
        .map_err(|e| match e {
            DatabaseError::Conflict(_) => ApiError::conflict(USERNAME_TAKEN),
            other => other.into(),
        })?;

    let id = establish_session(&session, &user.user_name).await?;
    tracing::info!(user = %user.user_name, "user signed up");

    Ok(ApiResponse::created(SessionInfo {
        id,
        user: user.user_name,
    }))
}
