// handlers/protected/collections/list.rs - GET /api/collections handler

use axum::extract::State;

use crate::handlers::protected::utils::resolve_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/collections - Names of the caller's collections
pub async fn list_get(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Vec<String>> {
    let user = resolve_user(state.store.as_ref(), &auth).await?;
    let names = state
        .store
        .find_collections(user.id)
        .await?
        .into_iter()
        .map(|c| c.collection)
        .collect();
    Ok(ApiResponse::success(names))
}
