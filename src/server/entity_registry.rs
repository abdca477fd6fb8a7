//! Entity registry for collecting the routes of each resource

use super::host::ServerHost;
use axum::Router;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait that describes how to build routes for an entity
///
/// Each resource (users, courses) implements this trait to provide its
/// routes, public and protected alike.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "course")
    fn entity_type(&self) -> &str;

    /// The plural form, used as the collection path (e.g., "courses")
    fn plural(&self) -> &str;

    /// Build the routes for this entity, with `host` as their state
    fn build_routes(&self, host: Arc<ServerHost>) -> Router;
}

/// Registry for all entities in the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: HashMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// The entity type name is the key; registering it again replaces it.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered entity
    pub fn build_routes(&self, host: Arc<ServerHost>) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(host.clone()));
        }

        router
    }

    /// Get all registered entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.descriptors.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::entities::{Course, User};
    use crate::server::handlers::{CourseDescriptor, UserDescriptor};
    use crate::storage::InMemoryDataService;

    fn host() -> Arc<ServerHost> {
        Arc::new(ServerHost::from_builder_components(
            AppConfig::default(),
            Arc::new(InMemoryDataService::<User>::new()),
            Arc::new(InMemoryDataService::<Course>::new()),
            None,
        ))
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(EntityRegistry::new().entity_types().is_empty());
    }

    #[test]
    fn test_register_resources() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(UserDescriptor));
        registry.register(Box::new(CourseDescriptor));
        assert_eq!(registry.entity_types(), vec!["course", "user"]);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(CourseDescriptor));
        registry.register(Box::new(CourseDescriptor));
        assert_eq!(registry.entity_types().len(), 1);
    }

    #[test]
    fn test_build_routes_merges_without_conflict() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(UserDescriptor));
        registry.register(Box::new(CourseDescriptor));
        let _router = registry.build_routes(host());
    }
}
