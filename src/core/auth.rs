//! Authentication and authorization for the course catalog
//!
//! - HTTP Basic credential parsing ([`BasicCredentials`])
//! - The authentication gate ([`AuthProvider`], [`BasicAuthProvider`])
//! - The per-request identity ([`CurrentUser`])
//! - The ownership rule for course mutation ([`can_mutate`])

use crate::core::password::CredentialVerifier;
use crate::core::service::{DataService, UserDirectory};
use crate::entities::{Course, User};
use anyhow::Result;
use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderValue, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Username/password pair carried by an `Authorization: Basic ...` header.
///
/// The username is the account's email address.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse a single header value.
    ///
    /// Returns `None` when the scheme is not `Basic`, the payload is not valid
    /// base64 or UTF-8, there is no `:` separator, or the username is empty.
    pub fn from_header(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?.trim();
        let (scheme, payload) = value.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(payload.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        // Passwords may contain ':'; only the first one separates the pair
        let (username, password) = decoded.split_once(':')?;
        if username.is_empty() {
            return None;
        }

        Some(Self::new(username, password))
    }

    /// Parse the `Authorization` header of a request, if any
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(Self::from_header)
    }

    /// Render as an `Authorization` header value
    pub fn to_header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", token)
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Why a request failed authentication.
///
/// Only logged; every variant produces the same response to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header, or one that could not be parsed
    CredentialsMissing,
    /// No user has the supplied email address
    UserNotFound,
    /// The password did not match the stored hash
    AuthenticationFailed,
}

impl AuthRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthRejection::CredentialsMissing => "credentials missing",
            AuthRejection::UserNotFound => "user not found",
            AuthRejection::AuthenticationFailed => "authentication failed",
        }
    }
}

impl fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Result of running the authentication gate over a request
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Authenticated(User),
    Rejected(AuthRejection),
}

/// The authenticated caller, attached to the request by the auth middleware
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the caller from request headers.
    ///
    /// `Err` is reserved for store failures; bad credentials are a
    /// [`AuthOutcome::Rejected`].
    async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthOutcome>;
}

/// Basic-auth provider backed by the user store
pub struct BasicAuthProvider {
    users: Arc<dyn DataService<User>>,
    verifier: CredentialVerifier,
}

impl BasicAuthProvider {
    pub fn new(users: Arc<dyn DataService<User>>, verifier: CredentialVerifier) -> Self {
        Self { users, verifier }
    }
}

#[async_trait]
impl AuthProvider for BasicAuthProvider {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthOutcome> {
        let Some(credentials) = BasicCredentials::from_headers(headers) else {
            return Ok(AuthOutcome::Rejected(AuthRejection::CredentialsMissing));
        };

        let Some(user) = self.users.find_by_email(&credentials.username).await? else {
            return Ok(AuthOutcome::Rejected(AuthRejection::UserNotFound));
        };

        let matches = self
            .verifier
            .verify_blocking(credentials.password, user.password.clone())
            .await?;

        if matches {
            Ok(AuthOutcome::Authenticated(user))
        } else {
            Ok(AuthOutcome::Rejected(AuthRejection::AuthenticationFailed))
        }
    }
}

/// Only the owner of a course may update or delete it
pub fn can_mutate(identity: &Uuid, course: &Course) -> bool {
    course.user_id == *identity
}
