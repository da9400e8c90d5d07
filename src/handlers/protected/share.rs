// handlers/protected/share.rs - POST /api/share handler

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::{BookInfo, RECOMMENDED};
use crate::error::ApiError;
use crate::handlers::protected::utils::{authorize_collection, resolve_user};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, FieldErrors, Message, Validate, ValidJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub book: BookInfo,
}

impl Validate for ShareRequest {
    fn validate(&self) -> Result<(), std::collections::HashMap<String, String>> {
        FieldErrors::new()
            .require("user", &self.user)
            .require("book.title", &self.book.title)
            .finish()
    }
}

/// POST /api/share - Put a book into another user's `recommended` collection
///
/// The target's other collections are untouched. 404 when the target user,
/// or their `recommended` collection, does not exist.
pub async fn share_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(body): ValidJson<ShareRequest>,
) -> ApiResult<Message> {
    let sender = resolve_user(state.store.as_ref(), &auth).await?;

    let target = state.store.find_user(&body.user).await?.ok_or_else(|| {
        ApiError::not_found(format!("User with username: {} does not exist", body.user))
    })?;

    let recommended = state
        .store
        .find_collection(target.id, RECOMMENDED)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "User {} has no {} collection",
                target.user_name, RECOMMENDED
            ))
        })?;
    authorize_collection(&target, &recommended)?;

    let book = state.store.create_book(&body.book).await?;
    state.store.add_book(recommended.id, book.id).await?;

    tracing::info!(
        from = %sender.user_name,
        to = %target.user_name,
        book_id = book.id,
        "book shared"
    );
    Ok(ApiResponse::created(Message::new("succesfully shared book")))
}
