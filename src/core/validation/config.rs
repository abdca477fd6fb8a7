//! Declarative validation rules

use super::validators;
use serde_json::Value;

/// A single check applied to one field of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Field must be a string with non-blank content
    Required,

    /// Field must be a string shaped like an email address
    Email,

    /// Field may be absent or null, otherwise it must be a string
    OptionalString,

    /// A string field may not exceed this many UTF-8 bytes
    MaxBytes(usize),
}

impl Rule {
    /// Check a field value (`None` when the field is absent)
    pub fn check(self, value: Option<&Value>) -> bool {
        match self {
            Rule::Required => validators::required(value),
            Rule::Email => validators::email(value),
            Rule::OptionalString => validators::optional_string(value),
            Rule::MaxBytes(limit) => validators::max_bytes(value, limit),
        }
    }
}

/// A `(field, rule, message)` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn new(field: &'static str, rule: Rule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            message,
        }
    }
}

/// Ordered rule list for one input type
#[derive(Debug, Clone, Copy)]
pub struct ValidationConfig {
    rules: &'static [FieldRule],
}

impl ValidationConfig {
    pub const fn new(rules: &'static [FieldRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    /// Evaluate every rule in order against `payload`.
    ///
    /// Once a field has failed, its remaining rules are skipped, so each
    /// field contributes at most one message. Failures across fields are all
    /// collected, in rule order.
    pub fn validate(&self, payload: &Value) -> Result<(), Vec<String>> {
        let mut failed_fields: Vec<&str> = Vec::new();
        let mut errors = Vec::new();

        for rule in self.rules {
            if failed_fields.contains(&rule.field) {
                continue;
            }
            if !rule.rule.check(payload.get(rule.field)) {
                failed_fields.push(rule.field);
                errors.push(rule.message.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
