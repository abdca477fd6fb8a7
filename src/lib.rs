//! # Course Catalog
//!
//! A REST API for users and the courses they own, backed by a document store.
//!
//! ## Features
//!
//! - **Basic Authentication**: email/password checked against a bcrypt hash on every request
//! - **Owner-Gated Mutation**: only a course's owner may update or delete it
//! - **Declarative Validation**: ordered `(field, rule, message)` lists, all violations reported at once
//! - **Pluggable Storage**: in-memory for development and tests, MongoDB behind `mongodb_backend`
//! - **YAML Configuration**: with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None)?;
//!     let stores = Stores::open(&config.storage).await?;
//!
//!     ServerBuilder::new()
//!         .with_config(config)
//!         .with_stores(&stores)
//!         .serve()
//!         .await?;
//!
//!     stores.close().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, AuthOutcome, AuthProvider, AuthRejection, BasicAuthProvider, BasicCredentials,
        ConfigError, CourseStore, CredentialVerifier, CurrentUser, DataService, Entity,
        StorageError, UserDirectory, can_mutate,
        validation::{FieldRule, Rule, ValidatableInput, Validated, ValidationConfig},
    };

    // === Entities ===
    pub use crate::entities::{
        Course, CourseDetail, CourseInput, NewUser, OwnerSummary, PersonName, User, UserProfile,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, Stores};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Config ===
    pub use crate::config::{AppConfig, LoggingConfig, SecurityConfig, ServerConfig, StorageConfig};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
