// handlers/protected/collections/add_book.rs - POST /api/collection handler

use axum::extract::State;

use super::AddBookRequest;
use crate::error::ApiError;
use crate::handlers::protected::utils::{authorize_collection, resolve_user};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message, ValidJson};
use crate::state::AppState;

/// POST /api/collection - Add a book to one of the caller's collections
///
/// Always creates a new book row, so adding the same pair twice lists it
/// twice. 404 when the caller has no collection by that name.
pub async fn add_book_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<AddBookRequest>,
) -> ApiResult<Message> {
    let user = resolve_user(state.store.as_ref(), &auth).await?;

    let collection = state
        .store
        .find_collection(user.id, &body.collection)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Collection '{}' not found", body.collection)))?;
    authorize_collection(&user, &collection)?;

    let book = state.store.create_book(&body.book).await?;
    state.store.add_book(collection.id, book.id).await?;

    tracing::info!(
        user = %user.user_name,
        collection_id = collection.id,
        book_id = book.id,
        "book added"
    );
    Ok(ApiResponse::created(Message::new("succesfully added book")))
}
