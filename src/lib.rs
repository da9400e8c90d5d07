pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::SessionStore;

use crate::config::SecurityConfig;
use crate::state::AppState;

/// Build the full application: API routes, optional static front-end,
/// session layer over `sessions`, CORS and request tracing.
pub fn app<S>(state: AppState, sessions: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = middleware::session_layer(sessions, &state.config.session);
    let cors = cors_layer(&state.config.security);
    let static_dir = state.config.server.static_dir.clone();

    let mut router = Router::new()
        .route("/health", get(handlers::public::health_get))
        .merge(public_routes())
        .merge(protected_routes())
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/signup", post(auth::signup_post))
        .route("/api/signin", post(auth::signin_post))
}

fn protected_routes() -> Router<AppState> {
    use handlers::protected::{self, collections};

    Router::new()
        .route("/api/logout", post(protected::logout_post))
        .route(
            "/api/collections",
            get(collections::list_get).post(collections::create_post),
        )
        .route("/api/collection", post(collections::add_book_post))
        .route("/api/collection/instance", post(collections::instance_post))
        .route("/api/share", post(protected::share_post))
        .route("/api/friends", get(protected::friends_get))
        .route("/api/search", get(protected::search_get))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
