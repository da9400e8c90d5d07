use serde::Serialize;
use sqlx::FromRow;

pub const RECOMMENDED: &str = "recommended";
pub const BESTSELLERS: &str = "bestsellers";

/// Collections every account starts with.
pub const DEFAULT_COLLECTIONS: [&str; 2] = [RECOMMENDED, BESTSELLERS];

/// Row of the `collections` table. Always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Collection {
    pub id: i64,
    pub collection: String,
    pub user_id: i64,
}

impl Collection {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}
