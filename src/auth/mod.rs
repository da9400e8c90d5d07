//! Credential hashing and the identity a session carries.

mod password;

use serde::{Deserialize, Serialize};

pub use password::{hash_password, spawn_hash, spawn_verify, verify_password, PasswordError};

/// Session key under which the authenticated identity is stored.
pub const SESSION_USER_KEY: &str = "user";

/// Identity bound to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_name: String,
}

impl SessionUser {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
        }
    }
}
