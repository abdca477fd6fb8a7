//! Shared test harness for storage backend testing
//!
//! Provides builders for `User` and `Course` records plus the
//! `data_service_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod data_service_tests;

use catalog::entities::{Course, CourseInput, NewUser, User};
use chrono::{DateTime, Utc};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A user whose `password` already holds a (fake) hash
pub fn create_test_user(first_name: &str, email: &str) -> User {
    User::new(
        NewUser {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email_address: email.to_string(),
            password: "plaintext".to_string(),
        },
        format!("$2b$04$fakehashfor{}", first_name),
    )
}

pub fn create_test_course(title: &str, owner: Uuid) -> Course {
    Course::new(
        CourseInput {
            title: title.to_string(),
            description: format!("All about {}", title),
            estimated_time: Some("2 hours".to_string()),
            materials_needed: None,
        },
        owner,
    )
}

/// A course with a fixed creation time, for ordering tests
pub fn create_test_course_at(title: &str, owner: Uuid, created_at: DateTime<Utc>) -> Course {
    let mut course = create_test_course(title, owner);
    course.created_at = created_at;
    course
}

// ---------------------------------------------------------------------------
// Assertions helpers
// ---------------------------------------------------------------------------

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

pub fn titles(courses: &[Course]) -> Vec<&str> {
    courses.iter().map(|c| c.title.as_str()).collect()
}
