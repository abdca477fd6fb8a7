//! Entity trait defining the core abstraction for stored documents

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for every document kept in a store.
///
/// All entities have:
/// - id: Unique identifier, assigned when the entity is created
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp, absent until the first update
///
/// Entities travel through storage backends as JSON documents, hence the
/// serde bounds.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource name, used for collections and URLs (e.g., "courses")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "course")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Check if the entity was modified after creation
    fn is_modified(&self) -> bool {
        self.updated_at().is_some()
    }
}
