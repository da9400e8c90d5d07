use crate::database::models::{Collection, User};
use crate::database::Store;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Resolve the session identity to its `User` row.
///
/// A session naming a user that no longer exists is treated as
/// unauthenticated.
pub async fn resolve_user(store: &dyn Store, auth: &AuthUser) -> Result<User, ApiError> {
    match store.find_user(&auth.user_name).await? {
        Some(user) => Ok(user),
        None => {
            tracing::warn!(user = %auth.user_name, "session refers to unknown user");
            Err(ApiError::unauthorized("Session user no longer exists"))
        }
    }
}

/// Refuse to operate on a collection the acting user does not own.
pub fn authorize_collection(user: &User, collection: &Collection) -> Result<(), ApiError> {
    if collection.is_owned_by(user.id) {
        return Ok(());
    }
    tracing::warn!(
        user = %user.user_name,
        collection_id = collection.id,
        owner_id = collection.user_id,
        "collection access denied"
    );
    Err(ApiError::forbidden(format!(
        "Collection '{}' does not belong to {}",
        collection.collection, user.user_name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            user_name: name.to_string(),
            password: String::new(),
        }
    }

    #[test]
    fn owner_is_authorized() {
        let alice = user(1, "alice");
        let reading = Collection {
            id: 7,
            collection: "reading".to_string(),
            user_id: 1,
        };
        assert!(authorize_collection(&alice, &reading).is_ok());
    }

    #[test]
    fn other_users_are_forbidden() {
        let bob = user(2, "bob");
        let reading = Collection {
            id: 7,
            collection: "reading".to_string(),
            user_id: 1,
        };
        let err = authorize_collection(&bob, &reading).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }
}
