// handlers/protected/collections/create.rs - POST /api/collections handler

use axum::extract::State;

use super::CollectionRequest;
use crate::handlers::protected::utils::resolve_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message, ValidJson};
use crate::state::AppState;

/// POST /api/collections - Create a collection owned by the caller
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<CollectionRequest>,
) -> ApiResult<Message> {
    let user = resolve_user(state.store.as_ref(), &auth).await?;
    let collection = state.store.add_collection(user.id, &body.collection).await?;

    tracing::info!(
        user = %user.user_name,
        collection = %collection.collection,
        collection_id = collection.id,
        "collection created"
    );
    Ok(ApiResponse::created(Message::new(
        "succesfully added collection",
    )))
}
