//! Domain entities: users and the courses they own

pub mod course;
pub mod user;

pub use course::{Course, CourseDetail, CourseInput, OwnerSummary};
pub use user::{NewUser, PersonName, User, UserProfile};
