pub mod book;
pub mod collection;
pub mod user;

pub use book::{Book, BookInfo};
pub use collection::{Collection, BESTSELLERS, DEFAULT_COLLECTIONS, RECOMMENDED};
pub use user::User;
