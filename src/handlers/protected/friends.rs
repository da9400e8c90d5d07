// handlers/protected/friends.rs - GET /api/friends handler

use axum::extract::State;

use crate::handlers::protected::utils::resolve_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// Size of the friend-candidate list.
pub const FRIENDS_LIMIT: i64 = 5;

/// GET /api/friends - Up to five usernames to share books with
pub async fn friends_get(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Vec<String>> {
    resolve_user(state.store.as_ref(), &auth).await?;
    let names = state
        .store
        .list_users(FRIENDS_LIMIT)
        .await?
        .into_iter()
        .map(|u| u.user_name)
        .collect();
    Ok(ApiResponse::success(names))
}
