// handlers/protected/collections/instance.rs - POST /api/collection/instance handler

use axum::extract::State;

use super::CollectionRequest;
use crate::database::models::BookInfo;
use crate::handlers::protected::utils::{authorize_collection, resolve_user};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/collection/instance - Books in one of the caller's collections
///
/// A collection the caller does not have yields an empty list.
pub async fn instance_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CollectionRequest>,
) -> ApiResult<Vec<BookInfo>> {
    let user = resolve_user(state.store.as_ref(), &auth).await?;

    let Some(collection) = state.store.find_collection(user.id, &body.collection).await? else {
        return Ok(ApiResponse::success(Vec::new()));
    };
    authorize_collection(&user, &collection)?;

    let books = state
        .store
        .find_books(collection.id)
        .await?
        .iter()
        .map(|b| b.to_info())
        .collect();
    Ok(ApiResponse::success(books))
}
