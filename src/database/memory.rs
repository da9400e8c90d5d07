use async_trait::async_trait;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{Book, BookInfo, Collection, User};
use super::store::Store;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    collections: Vec<Collection>,
    books: Vec<Book>,
    /// (collection_id, book_id) join rows in insertion order.
    collection_books: Vec<(i64, i64)>,
}

/// Process-local store for tests and `serve --memory`. Ids are assigned
/// per table starting at 1, the way a serial column would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn insert_user(&mut self, user_name: &str, password_hash: &str) -> Result<User, DatabaseError> {
        if self.users.iter().any(|u| u.user_name == user_name) {
            return Err(DatabaseError::Conflict(format!(
                "User '{}' already exists",
                user_name
            )));
        }
        let user = User {
            id: self.users.len() as i64 + 1,
            user_name: user_name.to_string(),
            password: password_hash.to_string(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn insert_collection(&mut self, user_id: i64, name: &str) -> Result<Collection, DatabaseError> {
        if !self.users.iter().any(|u| u.id == user_id) {
            return Err(DatabaseError::MissingReference(format!(
                "User id {} does not exist",
                user_id
            )));
        }
        let collection = Collection {
            id: self.collections.len() as i64 + 1,
            collection: name.to_string(),
            user_id,
        };
        self.collections.push(collection.clone());
        Ok(collection)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn sync_schema(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn create_user(&self, user_name: &str, password_hash: &str) -> Result<User, DatabaseError> {
        self.tables.write().await.insert_user(user_name, password_hash)
    }

    async fn create_account(
        &self,
        user_name: &str,
        password_hash: &str,
        collections: &[&str],
    ) -> Result<User, DatabaseError> {
        // One write guard covers every insert, so readers never see a user
        // without its collections.
        let mut tables = self.tables.write().await;
        let user = tables.insert_user(user_name, password_hash)?;
        for name in collections {
            tables.insert_collection(user.id, name)?;
        }
        Ok(user)
    }

    async fn find_user(&self, user_name: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn list_users(&self, limit: i64) -> Result<Vec<User>, DatabaseError> {
        let tables = self.tables.read().await;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(tables.users.iter().take(limit).cloned().collect())
    }

    async fn add_collection(&self, user_id: i64, name: &str) -> Result<Collection, DatabaseError> {
        self.tables.write().await.insert_collection(user_id, name)
    }

    async fn find_collections(&self, user_id: i64) -> Result<Vec<Collection>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .collections
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_collection(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<Option<Collection>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .collections
            .iter()
            .find(|c| c.user_id == user_id && c.collection == name)
            .cloned())
    }

    async fn create_book(&self, book: &BookInfo) -> Result<Book, DatabaseError> {
        let mut tables = self.tables.write().await;
        let book = Book {
            id: tables.books.len() as i64 + 1,
            title: book.title.clone(),
            author: book.author.clone(),
        };
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn add_book(&self, collection_id: i64, book_id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let known_collection = tables.collections.iter().any(|c| c.id == collection_id);
        let known_book = tables.books.iter().any(|b| b.id == book_id);
        if !known_collection || !known_book {
            return Err(DatabaseError::MissingReference(format!(
                "Collection {} or book {} does not exist",
                collection_id, book_id
            )));
        }
        if tables.collection_books.contains(&(collection_id, book_id)) {
            return Err(DatabaseError::Conflict(format!(
                "Book {} is already in collection {}",
                book_id, collection_id
            )));
        }
        tables.collection_books.push((collection_id, book_id));
        Ok(())
    }

    async fn find_books(&self, collection_id: i64) -> Result<Vec<Book>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .collection_books
            .iter()
            .filter(|(cid, _)| *cid == collection_id)
            .filter_map(|(_, bid)| tables.books.iter().find(|b| b.id == *bid).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn user_names_are_unique_and_case_sensitive() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "hash").await.unwrap();
        assert_eq!(alice.id, 1);

        let err = store.create_user("alice", "other").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
        assert_eq!(store.list_users(10).await.unwrap().len(), 1);

        assert!(store.find_user("Alice").await.unwrap().is_none());
        store.create_user("Alice", "hash").await.unwrap();
        assert_eq!(store.list_users(10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn collection_lookup_is_scoped_to_owner() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "h").await.unwrap();
        let bob = store.create_user("bob", "h").await.unwrap();
        store.add_collection(alice.id, "reading").await.unwrap();

        assert!(store.find_collection(alice.id, "reading").await.unwrap().is_some());
        assert!(store.find_collection(bob.id, "reading").await.unwrap().is_none());
        assert!(store.find_collection(alice.id, "Reading").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_collection_names_resolve_to_the_earliest() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "h").await.unwrap();
        let first = store.add_collection(alice.id, "reading").await.unwrap();
        store.add_collection(alice.id, "reading").await.unwrap();

        let found = store.find_collection(alice.id, "reading").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(store.find_collections(alice.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn one_book_row_can_sit_in_several_collections() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "h").await.unwrap();
        let bob = store.create_user("bob", "h").await.unwrap();
        let mine = store.add_collection(alice.id, "reading").await.unwrap();
        let theirs = store.add_collection(bob.id, "recommended").await.unwrap();

        let book = store.create_book(&BookInfo::new("Dune", "Herbert")).await.unwrap();
        store.add_book(mine.id, book.id).await.unwrap();
        store.add_book(theirs.id, book.id).await.unwrap();

        assert_eq!(store.find_books(mine.id).await.unwrap(), vec![book.clone()]);
        assert_eq!(store.find_books(theirs.id).await.unwrap(), vec![book]);
    }

    #[tokio::test]
    async fn linking_unknown_rows_fails() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "h").await.unwrap();
        let reading = store.add_collection(alice.id, "reading").await.unwrap();

        assert!(matches!(
            store.add_book(reading.id, 42).await,
            Err(DatabaseError::MissingReference(_))
        ));
        assert!(matches!(
            store.add_collection(99, "orphan").await,
            Err(DatabaseError::MissingReference(_))
        ));

        let book = store.create_book(&BookInfo::new("Dune", "Herbert")).await.unwrap();
        store.add_book(reading.id, book.id).await.unwrap();
        assert!(matches!(
            store.add_book(reading.id, book.id).await,
            Err(DatabaseError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn account_comes_with_its_collections() {
        let store = MemoryStore::new();
        let alice = store
            .create_account("alice", "h", &["recommended", "bestsellers"])
            .await
            .unwrap();

        let names: Vec<String> = store
            .find_collections(alice.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.collection)
            .collect();
        assert_eq!(names, vec!["recommended", "bestsellers"]);
    }

    #[tokio::test]
    async fn taken_account_name_adds_no_collections() {
        let store = MemoryStore::new();
        let alice = store.create_account("alice", "h", &["recommended"]).await.unwrap();

        let err = store
            .create_account("alice", "h", &["recommended"])
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
        assert_eq!(store.list_users(10).await.unwrap().len(), 1);
        assert_eq!(store.find_collections(alice.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_users_respects_limit() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c", "d", "e", "f", "g"] {
            store.create_user(name, "h").await.unwrap();
        }
        let names: Vec<String> = store
            .list_users(5)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.user_name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
    }
}
