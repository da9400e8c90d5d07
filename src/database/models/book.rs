use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `books` table. Rows are never deduplicated: two books with the
/// same title and author are distinct rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn to_info(&self) -> BookInfo {
        BookInfo {
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }
}

/// The `{title, author}` pair clients send and receive.
///
/// Only one author is kept per book; catalog results with several authors
/// are reduced to the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
}

impl BookInfo {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }
}
