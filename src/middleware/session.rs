use tower_sessions::cookie::{time::Duration, SameSite};
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};

use crate::auth::{SessionUser, SESSION_USER_KEY};
use crate::config::SessionConfig;

/// Session layer over any `SessionStore`, with cookie attributes from config.
pub fn session_layer<S>(store: S, config: &SessionConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::hours(config.expiry_hours)))
}

/// Bind `user_name` to the session under a freshly issued identifier.
///
/// The previous identifier (if any) is invalidated before the identity is
/// written, and the record is saved immediately so the new id can be
/// returned to the client.
pub async fn establish_session(
    session: &Session,
    user_name: &str,
) -> Result<String, tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_KEY, SessionUser::new(user_name))
        .await?;
    session.save().await?;
    Ok(session.id().map(|id| id.to_string()).unwrap_or_default())
}
