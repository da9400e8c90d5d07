// handlers/public/auth/mod.rs - Public authentication handlers
//
// Both handlers end by regenerating the session id and binding the user
// name to it; the response carries the new id.

use serde::{Deserialize, Serialize};

use crate::middleware::{FieldErrors, Validate};

pub mod signin; // POST /api/signin - verify credentials, open session
pub mod signup; // POST /api/signup - create account, open session

pub use signin::signin_post;
pub use signup::signup_post;

/// Body of `POST /api/signup` and `POST /api/signin`.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), std::collections::HashMap<String, String>> {
        FieldErrors::new()
            .require("username", &self.username)
            .require("password", &self.password)
            .finish()
    }
}

/// Session opened by signup/signin.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: String,
    pub user: String,
}
