//! HTTP server: shared host state, resource handlers and router assembly
//!
//! - `ServerBuilder` wires stores and configuration into a [`ServerHost`]
//! - each resource contributes its routes through an [`EntityDescriptor`]
//! - protected routes pass through [`middleware::require_authentication`]

pub mod builder;
pub mod entity_registry;
pub mod handlers;
pub mod host;
pub mod middleware;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use host::ServerHost;
