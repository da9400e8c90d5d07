use serde::Serialize;
use sqlx::FromRow;

/// Row of the `users` table. `password` holds a PHC hash, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    #[serde(skip_serializing)]
    pub password: String,
}
