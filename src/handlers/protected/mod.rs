// handlers/protected/mod.rs - Protected handlers (session identity required)
//
// Every handler here takes an `AuthUser`, re-derives the acting `User` row
// from it and scopes reads and writes to that user's collections.

pub mod auth; // POST /api/logout
pub mod collections; // /api/collections, /api/collection, /api/collection/instance
pub mod friends; // GET /api/friends
pub mod search; // GET /api/search
pub mod share; // POST /api/share
pub mod utils;

pub use auth::logout_post;
pub use friends::friends_get;
pub use search::search_get;
pub use share::share_post;
