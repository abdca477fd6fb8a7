//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then environment
//! overrides, then [`AppConfig::validate`]. Every section has defaults, so an
//! empty file (or no file at all) yields a runnable in-memory setup.

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Path every resource route is mounted under (e.g. "/api"); may be empty
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            api_prefix: "/api".to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port` suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The prefix without a trailing slash ("/" becomes "")
    pub fn normalized_prefix(&self) -> &str {
        self.api_prefix.trim_end_matches('/')
    }
}

/// Which document store backs the users and courses collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    #[default]
    InMemory,
    Mongodb {
        uri: String,
        #[serde(default = "default_database")]
        database: String,
    },
}

fn default_database() -> String {
    "course-catalog".to_string()
}

impl StorageConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageConfig::InMemory => "in_memory",
            StorageConfig::Mongodb { .. } => "mongodb",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Realm advertised in the `WWW-Authenticate` challenge
    pub realm: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            realm: "course-catalog".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// File (if any), then process environment, then validation
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CATALOG_*` and `MONGODB_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CATALOG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CATALOG_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Env {
                var: "CATALOG_PORT",
                value: port,
            })?;
        }
        if let Some(prefix) = lookup("CATALOG_API_PREFIX") {
            self.server.api_prefix = prefix;
        }
        if let Some(cost) = lookup("CATALOG_BCRYPT_COST") {
            self.security.bcrypt_cost = cost.parse().map_err(|_| ConfigError::Env {
                var: "CATALOG_BCRYPT_COST",
                value: cost,
            })?;
        }

        if let Some(uri) = lookup("MONGODB_URI") {
            let database = match &self.storage {
                StorageConfig::Mongodb { database, .. } => database.clone(),
                StorageConfig::InMemory => default_database(),
            };
            self.storage = StorageConfig::Mongodb { uri, database };
        }
        if let Some(name) = lookup("MONGODB_DATABASE")
            && let StorageConfig::Mongodb { database, .. } = &mut self.storage
        {
            *database = name;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port",
                message: "must be greater than 0".to_string(),
            });
        }
        let prefix = &self.server.api_prefix;
        if !prefix.is_empty() && !prefix.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "server.api_prefix",
                message: format!("'{}' must start with '/'", prefix),
            });
        }
        let cost = self.security.bcrypt_cost;
        if !(4..=31).contains(&cost) {
            return Err(ConfigError::Invalid {
                field: "security.bcrypt_cost",
                message: format!("{} is outside 4..=31", cost),
            });
        }
        if let StorageConfig::Mongodb { uri, database } = &self.storage {
            if uri.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "storage.uri",
                    message: "must not be empty".to_string(),
                });
            }
            if database.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "storage.database",
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
