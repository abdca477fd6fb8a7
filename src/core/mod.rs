//! Core module containing the traits and types shared by storage and the HTTP layer

pub mod auth;
pub mod entity;
pub mod error;
pub mod password;
pub mod service;
pub mod validation;

pub use auth::{
    AuthOutcome, AuthProvider, AuthRejection, BasicAuthProvider, BasicCredentials, CurrentUser,
    can_mutate,
};
pub use entity::Entity;
pub use error::{ApiError, ConfigError, StorageError};
pub use password::{CredentialVerifier, MAX_PASSWORD_BYTES};
pub use service::{CourseStore, DataService, UserDirectory};
