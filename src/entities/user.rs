//! User accounts and their public projections

use crate::core::entity::Entity;
use crate::core::password::MAX_PASSWORD_BYTES;
use crate::core::validation::{FieldRule, Rule, ValidatableInput, ValidationConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A registered user.
///
/// `password` always holds a bcrypt hash once the record has been persisted.
/// It is stored with the document but never rendered in an HTTP response;
/// handlers answer with [`UserProfile`] or [`OwnerSummary`](super::OwnerSummary).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Build a new user from sign-up data and an already hashed password
    pub fn new(input: NewUser, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email_address: input.email_address,
            password: password_hash,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Sign-up payload for `POST /users`
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

const NEW_USER_RULES: &[FieldRule] = &[
    FieldRule::new("firstName", Rule::Required, "Please provide a value for 'firstName'"),
    FieldRule::new("lastName", Rule::Required, "Please provide a value for 'lastName'"),
    FieldRule::new(
        "emailAddress",
        Rule::Required,
        "Please provide a value for 'emailAddress'",
    ),
    FieldRule::new(
        "emailAddress",
        Rule::Email,
        "Please provide a valid email address for 'emailAddress'",
    ),
    FieldRule::new("password", Rule::Required, "Please provide a value for 'password'"),
    FieldRule::new(
        "password",
        Rule::MaxBytes(MAX_PASSWORD_BYTES),
        "'password' must be at most 72 bytes long",
    ),
];

impl ValidatableInput for NewUser {
    fn validation_config() -> ValidationConfig {
        ValidationConfig::new(NEW_USER_RULES)
    }
}

/// Person name as rendered by `GET /users`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

/// The caller's own profile: `{"name": {firstName, lastName}, "email": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub name: PersonName,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            name: PersonName {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            email: user.email_address.clone(),
        }
    }
}
