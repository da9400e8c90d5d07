// handlers/protected/search.rs - GET /api/search handler

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::database::models::BookInfo;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q= - Search the external book catalog
///
/// Returns `{title, author}` pairs; only the first author of each volume is
/// kept. 502 when the catalog cannot be reached or answers with an error.
pub async fn search_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<BookInfo>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ApiError::bad_request("Query parameter 'q' is required"));
    }

    tracing::debug!(user = %auth.user_name, query = q, "catalog search");
    let results = state.catalog.search(q).await?;
    Ok(ApiResponse::success(results))
}
