//! Server host holding the state every handler needs
//!
//! The host is built once by [`ServerBuilder`](super::ServerBuilder), wrapped
//! in an `Arc` and injected into handlers as axum state. Nothing in the HTTP
//! layer reaches a store any other way.

use crate::config::AppConfig;
use crate::core::{AuthProvider, BasicAuthProvider, CredentialVerifier, DataService};
use crate::entities::{Course, User};
use std::sync::Arc;
use uuid::Uuid;

/// Host context containing all application state
pub struct ServerHost {
    /// Validated application configuration
    pub config: Arc<AppConfig>,

    pub users: Arc<dyn DataService<User>>,

    pub courses: Arc<dyn DataService<Course>>,

    /// Authentication gate for protected routes
    pub auth: Arc<dyn AuthProvider>,

    /// Password hasher used at sign-up
    pub verifier: CredentialVerifier,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// Without an explicit provider, Basic authentication against `users` is used.
    pub fn from_builder_components(
        config: AppConfig,
        users: Arc<dyn DataService<User>>,
        courses: Arc<dyn DataService<Course>>,
        auth: Option<Arc<dyn AuthProvider>>,
    ) -> Self {
        let verifier = CredentialVerifier::new(config.security.bcrypt_cost);
        let auth: Arc<dyn AuthProvider> = match auth {
            Some(provider) => provider,
            None => Arc::new(BasicAuthProvider::new(users.clone(), verifier)),
        };

        Self {
            config: Arc::new(config),
            users,
            courses,
            auth,
            verifier,
        }
    }

    /// Realm advertised on 401 responses
    pub fn realm(&self) -> &str {
        &self.config.security.realm
    }

    /// Route prefix without a trailing slash
    pub fn api_prefix(&self) -> &str {
        self.config.server.normalized_prefix()
    }

    /// Canonical path of a course, used for the `Location` header
    pub fn course_location(&self, id: &Uuid) -> String {
        format!("{}/courses/{}", self.api_prefix(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDataService;

    fn host_with_prefix(prefix: &str) -> ServerHost {
        let mut config = AppConfig::default();
        config.server.api_prefix = prefix.to_string();
        config.security.bcrypt_cost = 4;
        ServerHost::from_builder_components(
            config,
            Arc::new(InMemoryDataService::<User>::new()),
            Arc::new(InMemoryDataService::<Course>::new()),
            None,
        )
    }

    #[test]
    fn test_course_location_uses_prefix() {
        let id = Uuid::new_v4();
        assert_eq!(
            host_with_prefix("/api").course_location(&id),
            format!("/api/courses/{}", id)
        );
        assert_eq!(
            host_with_prefix("").course_location(&id),
            format!("/courses/{}", id)
        );
        assert_eq!(
            host_with_prefix("/v2/").course_location(&id),
            format!("/v2/courses/{}", id)
        );
    }

    #[test]
    fn test_verifier_follows_config_cost() {
        let host = host_with_prefix("/api");
        assert_eq!(host.verifier.cost(), 4);
        assert_eq!(host.realm(), "course-catalog");
    }
}
