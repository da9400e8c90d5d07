use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Per-endpoint schema check run after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), HashMap<String, String>>;
}

/// Collects per-field messages for a `Validate` impl.
#[derive(Debug, Default)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` as missing when `value` is blank.
    pub fn require(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.0
                .insert(field.to_string(), "This field is required".to_string());
        }
        self
    }

    pub fn finish(self) -> Result<(), HashMap<String, String>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

/// JSON body that has been deserialized and validated. Malformed JSON maps
/// to `INVALID_JSON`, failed validation to `VALIDATION_ERROR`; both are 400.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;

        value
            .validate()
            .map_err(|fields| ApiError::validation_error("Invalid request body", Some(fields)))?;

        Ok(Self(value))
    }
}
