//! Storage implementations for different backends
//!
//! [`Stores`] owns the opened backend for the lifetime of the process: it is
//! opened once at startup, cloned into the HTTP state, and closed at shutdown.

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryDataService;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoDataService;

use crate::config::StorageConfig;
use crate::core::{DataService, StorageError};
use crate::entities::{Course, User};
use std::sync::Arc;

/// Handles to the user and course stores of one backend
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn DataService<User>>,
    pub courses: Arc<dyn DataService<Course>>,
    backend: &'static str,
    #[cfg(feature = "mongodb_backend")]
    client: Option<::mongodb::Client>,
}

impl Stores {
    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryDataService::<User>::new()),
            courses: Arc::new(InMemoryDataService::<Course>::new()),
            backend: "in_memory",
            #[cfg(feature = "mongodb_backend")]
            client: None,
        }
    }

    /// Open the configured backend
    pub async fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let stores = match config {
            StorageConfig::InMemory => Self::in_memory(),
            StorageConfig::Mongodb { uri, database } => Self::open_mongodb(uri, database).await?,
        };
        tracing::info!(backend = stores.backend, "storage opened");
        Ok(stores)
    }

    #[cfg(feature = "mongodb_backend")]
    async fn open_mongodb(uri: &str, database: &str) -> Result<Self, StorageError> {
        use ::mongodb::bson::doc;

        let client = ::mongodb::Client::with_uri_str(uri)
            .await
            .map_err(connection_error)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;

        let users = MongoDataService::<User>::new(db.clone());
        users
            .ensure_index("emailAddress")
            .await
            .map_err(connection_error)?;
        let courses = MongoDataService::<Course>::new(db);
        courses
            .ensure_index("userId")
            .await
            .map_err(connection_error)?;

        Ok(Self {
            users: Arc::new(users),
            courses: Arc::new(courses),
            backend: "mongodb",
            client: Some(client),
        })
    }

    #[cfg(not(feature = "mongodb_backend"))]
    async fn open_mongodb(_uri: &str, _database: &str) -> Result<Self, StorageError> {
        Err(StorageError::Unavailable {
            backend: "mongodb",
            feature: "mongodb_backend",
        })
    }

    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Release backend resources
    pub async fn close(self) {
        #[cfg(feature = "mongodb_backend")]
        if let Some(client) = self.client {
            client.shutdown().await;
        }
        tracing::info!(backend = self.backend, "storage closed");
    }
}

#[cfg(feature = "mongodb_backend")]
fn connection_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Connection {
        backend: "mongodb",
        message: e.to_string(),
    }
}
