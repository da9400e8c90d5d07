use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;
use super::models::{Book, BookInfo, Collection, User};
use super::store::Store;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Executed in order by `sync_schema`; every statement is idempotent.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        user_name TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS collections (
        id BIGSERIAL PRIMARY KEY,
        collection TEXT NOT NULL,
        user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS collections_owner_name_idx ON collections (user_id, collection)",
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS collections_to_books (
        collection_id BIGINT NOT NULL REFERENCES collections (id) ON DELETE CASCADE,
        book_id BIGINT NOT NULL REFERENCES books (id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (collection_id, book_id)
    )
    "#,
];

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

/// Map constraint violations onto the store's error variants; anything
/// else stays a driver error.
fn constraint_error(
    err: sqlx::Error,
    conflict: impl FnOnce() -> String,
    missing: impl FnOnce() -> String,
) -> DatabaseError {
    let code = match &err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    };
    match code.as_deref() {
        Some(UNIQUE_VIOLATION) => DatabaseError::Conflict(conflict()),
        Some(FOREIGN_KEY_VIOLATION) => DatabaseError::MissingReference(missing()),
        _ => DatabaseError::Sqlx(err),
    }
}

fn user_exists(user_name: &str) -> impl FnOnce() -> String + '_ {
    move || format!("User '{}' already exists", user_name)
}

#[async_trait]
impl Store for PgStore {
    async fn sync_schema(&self) -> Result<(), DatabaseError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::SchemaError(e.to_string()))?;
        }
        info!(statements = SCHEMA.len(), "Database schema synchronized");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, user_name: &str, password_hash: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (user_name, password) VALUES ($1, $2) RETURNING id, user_name, password",
        )
        .bind(user_name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, user_exists(user_name), String::new))
    }

    async fn create_account(
        &self,
        user_name: &str,
        password_hash: &str,
        collections: &[&str],
    ) -> Result<User, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (user_name, password) VALUES ($1, $2) RETURNING id, user_name, password",
        )
        .bind(user_name)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| constraint_error(e, user_exists(user_name), String::new))?;

        for name in collections {
            sqlx::query("INSERT INTO collections (collection, user_id) VALUES ($1, $2)")
                .bind(*name)
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }

        // Dropping the transaction on an early return rolls it back.
        tx.commit().await?;
        Ok(user)
    }

    async fn find_user(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, user_name, password FROM users WHERE user_name = $1",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_users(&self, limit: i64) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, user_name, password FROM users ORDER BY id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn add_collection(&self, user_id: i64, name: &str) -> Result<Collection, DatabaseError> {
        let collection = sqlx::query_as::<_, Collection>(
            "INSERT INTO collections (collection, user_id) VALUES ($1, $2) RETURNING id, collection, user_id",
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            constraint_error(e, String::new, || format!("User id {} does not exist", user_id))
        })?;
        Ok(collection)
    }

    async fn find_collections(&self, user_id: i64) -> Result<Vec<Collection>, DatabaseError> {
        let collections = sqlx::query_as::<_, Collection>(
            "SELECT id, collection, user_id FROM collections WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(collections)
    }

    async fn find_collection(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<Option<Collection>, DatabaseError> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, collection, user_id
            FROM collections
            WHERE user_id = $1 AND collection = $2
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(collection)
    }

    async fn create_book(&self, book: &BookInfo) -> Result<Book, DatabaseError> {
        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author) VALUES ($1, $2) RETURNING id, title, author",
        )
        .bind(&book.title)
        .bind(&book.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn add_book(&self, collection_id: i64, book_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO collections_to_books (collection_id, book_id) VALUES ($1, $2)")
            .bind(collection_id)
            .bind(book_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                constraint_error(
                    e,
                    || format!("Book {} is already in collection {}", book_id, collection_id),
                    || format!("Collection {} or book {} does not exist", collection_id, book_id),
                )
            })?;
        Ok(())
    }

    async fn find_books(&self, collection_id: i64) -> Result<Vec<Book>, DatabaseError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.author
            FROM books b
            JOIN collections_to_books cb ON cb.book_id = b.id
            WHERE cb.collection_id = $1
            ORDER BY cb.created_at, b.id
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_statements_are_idempotent() {
        for statement in SCHEMA {
            assert!(statement.contains("IF NOT EXISTS"), "{}", statement);
        }
    }

    #[test]
    fn schema_has_no_unwritten_columns() {
        assert!(SCHEMA.iter().all(|s| !s.contains("updated_at")));
    }

    #[test]
    fn non_constraint_errors_stay_driver_errors() {
        let err = constraint_error(
            sqlx::Error::RowNotFound,
            || "conflict".to_string(),
            || "missing".to_string(),
        );
        assert!(matches!(err, DatabaseError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
