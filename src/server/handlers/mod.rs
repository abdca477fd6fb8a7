//! HTTP handlers for the user and course resources

pub mod courses;
pub mod users;

pub use courses::CourseDescriptor;
pub use users::UserDescriptor;

use crate::core::ApiError;
use uuid::Uuid;

/// Parse a path id. A string that is not a UUID cannot name a record.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}
