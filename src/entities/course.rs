//! Courses and the owner projection used when reading a single course

use super::user::User;
use crate::core::entity::Entity;
use crate::core::validation::{FieldRule, Rule, ValidatableInput, ValidationConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course owned by exactly one user (`user_id`).
///
/// The owner reference is weak: deleting a user does not touch their courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Create a course owned by `owner`
    pub fn new(input: CourseInput, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            estimated_time: input.estimated_time,
            materials_needed: input.materials_needed,
            user_id: owner,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Overwrite every mutable field and re-assign ownership to `owner`
    pub fn apply(&mut self, input: CourseInput, owner: Uuid) {
        self.title = input.title;
        self.description = input.description;
        self.estimated_time = input.estimated_time;
        self.materials_needed = input.materials_needed;
        self.user_id = owner;
        self.updated_at = Some(Utc::now());
    }
}

impl Entity for Course {
    fn resource_name() -> &'static str {
        "courses"
    }

    fn resource_name_singular() -> &'static str {
        "course"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

/// Payload accepted by `POST /courses` and `PUT /courses/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub materials_needed: Option<String>,
}

const COURSE_RULES: &[FieldRule] = &[
    FieldRule::new("title", Rule::Required, "Please provide a value for 'title'"),
    FieldRule::new(
        "description",
        Rule::Required,
        "Please provide a value for 'description'",
    ),
    FieldRule::new(
        "estimatedTime",
        Rule::OptionalString,
        "'estimatedTime' must be a string",
    ),
    FieldRule::new(
        "materialsNeeded",
        Rule::OptionalString,
        "'materialsNeeded' must be a string",
    ),
];

impl ValidatableInput for CourseInput {
    fn validation_config() -> ValidationConfig {
        ValidationConfig::new(COURSE_RULES)
    }
}

/// Reduced view of a course owner. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<&User> for OwnerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email_address: user.email_address.clone(),
        }
    }
}

/// A course with its `userId` expanded into the owner's summary.
///
/// `user_id` is `None` when the owner record no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Option<OwnerSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CourseDetail {
    pub fn new(course: Course, owner: Option<&User>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: owner.map(OwnerSummary::from),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}
