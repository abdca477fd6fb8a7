//! Validation of request payloads
//!
//! Each input type declares an ordered list of `(field, rule, message)`
//! triples. The list is evaluated against the raw JSON payload before the
//! payload is deserialized, so every violation is reported at once.

pub mod config;
pub mod extractor;
pub mod validators;

pub use config::{FieldRule, Rule, ValidationConfig};
pub use extractor::{ValidatableInput, Validated};
