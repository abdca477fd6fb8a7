//! Typed error handling for the course catalog
//!
//! [`ApiError`] is the single boundary error every handler returns. Its
//! variants follow the failure taxonomy of the API:
//!
//! - [`ApiError::Validation`]: malformed or missing input (400, every message listed)
//! - [`ApiError::Unauthorized`]: missing or rejected credentials (401, generic message)
//! - [`ApiError::Forbidden`]: authenticated caller is not the owner (403)
//! - [`ApiError::NotFound`]: unmatched route or unknown id (404)
//! - [`ApiError::Internal`]: store or other unexpected failure (500, details logged only)
//!
//! Startup failures use the `thiserror` based [`ConfigError`] and [`StorageError`].

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

/// Body message for every authentication rejection
pub const ACCESS_DENIED: &str = "Access Denied";

/// Body message for an ownership rejection
pub const FORBIDDEN: &str = "Forbidden";

/// Body message for the generic not-found responder
pub const ROUTE_NOT_FOUND: &str = "Route Not Found";

/// Body message for every unexpected failure
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Validation message for a body that is not JSON
pub const INVALID_JSON: &str = "Request body must be valid JSON";

/// The error type returned by every HTTP handler
#[derive(Debug)]
pub enum ApiError {
    /// Input validation failed; messages are in rule order
    Validation(Vec<String>),

    /// Credentials were missing, malformed or did not match
    Unauthorized { realm: String },

    /// The authenticated caller may not mutate the target
    Forbidden,

    /// The route or the addressed record does not exist
    NotFound,

    /// Anything else; never shown to the caller
    Internal(anyhow::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(messages) => {
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            ApiError::Unauthorized { .. } => write!(f, "{}", ACCESS_DENIED),
            ApiError::Forbidden => write!(f, "{}", FORBIDDEN),
            ApiError::NotFound => write!(f, "{}", ROUTE_NOT_FOUND),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Internal(e) => Some(&**e),
            _ => None,
        }
    }
}

impl ApiError {
    /// Build a 401 for the given realm
    pub fn unauthorized(realm: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            realm: realm.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(messages) => {
                (status, Json(json!({ "errors": messages }))).into_response()
            }
            ApiError::Unauthorized { realm } => {
                let mut response =
                    (status, Json(json!({ "message": ACCESS_DENIED }))).into_response();
                if let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
                {
                    response
                        .headers_mut()
                        .insert(header::WWW_AUTHENTICATE, challenge);
                }
                response
            }
            ApiError::Forbidden => (status, Json(json!({ "message": FORBIDDEN }))).into_response(),
            ApiError::NotFound => {
                (status, Json(json!({ "message": ROUTE_NOT_FOUND }))).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed with an unexpected error");
                (status, Json(json!({ "message": INTERNAL_SERVER_ERROR }))).into_response()
            }
        }
    }
}

// =============================================================================
// Startup errors
// =============================================================================

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value '{value}' in environment variable {var}")]
    Env { var: &'static str, value: String },

    #[error("invalid config field '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Errors raised while opening a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend '{backend}' is not compiled in (enable the `{feature}` feature)")]
    Unavailable {
        backend: &'static str,
        feature: &'static str,
    },

    #[error("failed to connect to {backend}: {message}")]
    Connection {
        backend: &'static str,
        message: String,
    },
}
