// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation, sign in and the liveness check. These run without a
// trusted identity, so every input is validated before it reaches storage.

pub mod auth;
pub mod health;

pub use auth::{signin_post, signup_post};
pub use health::health_get;
