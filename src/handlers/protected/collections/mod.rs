// handlers/protected/collections/mod.rs - Collection and book handlers

use serde::Deserialize;

use crate::database::models::BookInfo;
use crate::middleware::{FieldErrors, Validate};

pub mod add_book; // POST /api/collection
pub mod create; // POST /api/collections
pub mod instance; // POST /api/collection/instance
pub mod list; // GET /api/collections

pub use add_book::add_book_post;
pub use create::create_post;
pub use instance::instance_post;
pub use list::list_get;

/// Body naming one of the caller's collections.
#[derive(Debug, Deserialize)]
pub struct CollectionRequest {
    #[serde(default)]
    pub collection: String,
}

impl Validate for CollectionRequest {
    fn validate(&self) -> Result<(), std::collections::HashMap<String, String>> {
        FieldErrors::new()
            .require("collection", &self.collection)
            .finish()
    }
}

/// Body of `POST /api/collection`.
#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    #[serde(default)]
    pub collection: String,
    #[serde(default)]
    pub book: BookInfo,
}

impl Validate for AddBookRequest {
    fn validate(&self) -> Result<(), std::collections::HashMap<String, String>> {
        FieldErrors::new()
            .require("collection", &self.collection)
            .require("book.title", &self.book.title)
            .finish()
    }
}
