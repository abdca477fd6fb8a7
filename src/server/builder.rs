//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::handlers::{CourseDescriptor, UserDescriptor};
use super::host::ServerHost;
use super::router::build_router;
use crate::config::AppConfig;
use crate::core::{AuthProvider, DataService};
use crate::entities::{Course, User};
use crate::storage::Stores;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the HTTP application
///
/// # Example
///
/// ```ignore
/// let stores = Stores::open(&config.storage).await?;
/// let app = ServerBuilder::new()
///     .with_config(config)
///     .with_stores(&stores)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    users: Option<Arc<dyn DataService<User>>>,
    courses: Option<Arc<dyn DataService<Course>>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a builder with the user and course resources registered
    pub fn new() -> Self {
        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(UserDescriptor));
        entity_registry.register(Box::new(CourseDescriptor));

        Self {
            config: AppConfig::default(),
            users: None,
            courses: None,
            auth_provider: None,
            entity_registry,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the user store (required)
    pub fn with_user_service(mut self, service: impl DataService<User> + 'static) -> Self {
        self.users = Some(Arc::new(service));
        self
    }

    /// Set the course store (required)
    pub fn with_course_service(mut self, service: impl DataService<Course> + 'static) -> Self {
        self.courses = Some(Arc::new(service));
        self
    }

    /// Use both stores of an opened backend
    pub fn with_stores(mut self, stores: &Stores) -> Self {
        self.users = Some(stores.users.clone());
        self.courses = Some(stores.courses.clone());
        self
    }

    /// Replace the default Basic authentication provider
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    /// Add custom routes to the server, outside the API prefix
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared host state
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let users = self
            .users
            .clone()
            .ok_or_else(|| anyhow::anyhow!("User service is required. Call .with_user_service()"))?;
        let courses = self.courses.clone().ok_or_else(|| {
            anyhow::anyhow!("Course service is required. Call .with_course_service()")
        })?;

        Ok(ServerHost::from_builder_components(
            self.config.clone(),
            users,
            courses,
            self.auth_provider.clone(),
        ))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        let custom_routes = std::mem::take(&mut self.custom_routes);
        Ok(build_router(host, &self.entity_registry, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` from the configuration and stops on
    /// SIGTERM or Ctrl+C after in-flight requests complete.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDataService;

    #[test]
    fn test_new_registers_both_resources() {
        let builder = ServerBuilder::new();
        assert_eq!(builder.entity_registry.entity_types(), vec!["course", "user"]);
    }

    #[test]
    fn test_build_without_user_service_fails() {
        let result = ServerBuilder::new()
            .with_course_service(InMemoryDataService::<Course>::new())
            .build();
        let err = result.err().expect("build should fail");
        assert!(err.to_string().contains("User service is required"));
    }

    #[test]
    fn test_build_without_course_service_fails() {
        let result = ServerBuilder::new()
            .with_user_service(InMemoryDataService::<User>::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_host_carries_config() {
        let mut config = AppConfig::default();
        config.security.realm = "test-realm".to_string();

        let mut builder = ServerBuilder::new()
            .with_config(config)
            .with_stores(&Stores::in_memory());
        let host = builder.build_host().unwrap();
        assert_eq!(host.realm(), "test-realm");
    }

    #[test]
    fn test_build_with_custom_routes() {
        let result = ServerBuilder::new()
            .with_stores(&Stores::in_memory())
            .with_custom_routes(Router::new().route("/ping", axum::routing::get(|| async { "pong" })))
            .build();
        assert!(result.is_ok());
    }
}

/// Resolve on SIGTERM or Ctrl+C
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, draining connections");
        },
        _ = terminate => {
            tracing::info!("SIGTERM received, draining connections");
        },
    }
}
