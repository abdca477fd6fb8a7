//! Axum extractor for validated request payloads
//!
//! This module provides the `Validated<T>` extractor that checks the raw
//! JSON body against `T`'s rule list before deserializing it.

use super::config::ValidationConfig;
use crate::core::error::{ApiError, INVALID_JSON};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Trait for request payloads that carry validation rules
pub trait ValidatableInput: DeserializeOwned {
    fn validation_config() -> ValidationConfig;
}

/// Axum extractor yielding a payload that passed its validation rules
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_course(
///     Validated(input): Validated<CourseInput>,
/// ) -> Result<Response, ApiError> {
///     // every required field is present and non-blank
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableInput + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![rejection.body_text()]))?;

        let payload = parse_payload(&body)?;

        T::validation_config()
            .validate(&payload)
            .map_err(ApiError::Validation)?;

        serde_json::from_value(payload)
            .map(Validated)
            .map_err(|e| ApiError::Validation(vec![e.to_string()]))
    }
}

/// Parse a request body, treating an empty body as an empty object
pub fn parse_payload(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(body).map_err(|_| ApiError::Validation(vec![INVALID_JSON.to_string()]))
}
