use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Book, BookInfo, Collection, User};

/// Typed persistence operations for users, collections and books.
///
/// Lookups by natural key are exact and case-sensitive and return `Ok(None)`
/// when nothing matches. Each call is one independent statement; callers do
/// not get cross-call atomicity.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Create tables that do not exist yet.
    async fn sync_schema(&self) -> Result<(), DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Fails with `DatabaseError::Conflict` when `user_name` is taken.
    async fn create_user(&self, user_name: &str, password_hash: &str) -> Result<User, DatabaseError>;

    /// Create a user together with its starting collections. Either all of
    /// the rows are stored or none are; `Conflict` when `user_name` is taken.
    async fn create_account(
        &self,
        user_name: &str,
        password_hash: &str,
        collections: &[&str],
    ) -> Result<User, DatabaseError>;

    async fn find_user(&self, user_name: &str) -> Result<Option<User>, DatabaseError>;

    /// Users in creation order, at most `limit` of them.
    async fn list_users(&self, limit: i64) -> Result<Vec<User>, DatabaseError>;

    /// Create a collection owned by `user_id`. `MissingReference` when the
    /// user does not exist.
    async fn add_collection(&self, user_id: i64, name: &str) -> Result<Collection, DatabaseError>;

    async fn find_collections(&self, user_id: i64) -> Result<Vec<Collection>, DatabaseError>;

    /// Earliest collection of `user_id` named `name`.
    async fn find_collection(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<Option<Collection>, DatabaseError>;

    async fn create_book(&self, book: &BookInfo) -> Result<Book, DatabaseError>;

    /// Link an existing book row into a collection. `MissingReference` when
    /// either row does not exist, `Conflict` when the link is already there.
    async fn add_book(&self, collection_id: i64, book_id: i64) -> Result<(), DatabaseError>;

    /// Books linked into the collection, in the order they were added.
    async fn find_books(&self, collection_id: i64) -> Result<Vec<Book>, DatabaseError>;
}
