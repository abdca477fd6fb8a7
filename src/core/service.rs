//! Service traits for stored entities

use crate::core::entity::Entity;
use crate::entities::{Course, User};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing stored entities
///
/// Implementations provide CRUD operations for a specific entity type.
/// Handlers are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Persist a new entity and return it as stored
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities, oldest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing entity. Fails if `id` is unknown.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete an entity. Deleting an unknown id is not an error.
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Find entities whose serialized `field` equals `value`
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;
}

/// Lookups on the user store used by authentication
#[async_trait]
pub trait UserDirectory: DataService<User> {
    /// Find the user with this exact email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.search("emailAddress", email).await?.into_iter().next())
    }
}

impl<S: DataService<User> + ?Sized> UserDirectory for S {}

/// Lookups on the course store
#[async_trait]
pub trait CourseStore: DataService<Course> {
    /// Every course owned by `owner`
    async fn find_by_owner(&self, owner: &Uuid) -> Result<Vec<Course>> {
        self.search("userId", &owner.to_string()).await
    }
}

impl<S: DataService<Course> + ?Sized> CourseStore for S {}
