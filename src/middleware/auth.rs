use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::auth::{SessionUser, SESSION_USER_KEY};
use crate::error::ApiError;

/// Authenticated identity taken from the session. Extracting it from a
/// request whose session holds no identity rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_name: String,
    pub session: Session,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| {
                tracing::error!("Session unavailable: {}", msg);
                ApiError::internal_server_error("Session unavailable")
            })?;

        let user: Option<SessionUser> = session.get(SESSION_USER_KEY).await?;
        let Some(user) = user else {
            return Err(ApiError::unauthorized("Authentication required"));
        };

        Ok(Self {
            user_name: user.user_name,
            session,
        })
    }
}
