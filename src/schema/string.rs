//! String schema validation.
//!
//! This module provides [`StringSchema`]. With no constraints it is the plain
//! `string` leaf; length and pattern constraints refine it.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::ValidationFailure;
use crate::path::FieldPath;

use super::collect::{as_elements, collect_all};
use super::traits::SchemaLike;

#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// A schema for string values.
///
/// Every violated constraint is reported. A single violation is returned as a
/// leaf failure; several are nested under one failure for the string.
///
/// # Example
///
/// ```rust
/// use sortie::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let callsign = Schema::string()
///     .min_len(3)
///     .max_len(12)
///     .pattern(r"^[A-Z0-9-]+$")
///     .unwrap();
///
/// assert!(callsign.validate(&json!("VIPER-1"), "callsign").is_ok());
///
/// let failure = callsign.validate(&json!("v"), "callsign").unwrap_err();
/// assert_eq!(failure.elements().len(), 2);
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires the string to match `pattern`.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Sets the message of the most recent constraint, or the type error
    /// message when no constraint has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    fn check_constraint(
        &self,
        constraint: &StringConstraint,
        value: &str,
        raw: &Value,
        path: &FieldPath,
    ) -> Result<(), ValidationFailure> {
        let (correct_type, default_message, message) = match constraint {
            StringConstraint::MinLength { min, message } => {
                let len = value.chars().count();
                if len >= *min {
                    return Ok(());
                }
                (
                    format!("string of at least {} characters", min),
                    format!("length must be at least {}, got {}", min, len),
                    message,
                )
            }
            StringConstraint::MaxLength { max, message } => {
                let len = value.chars().count();
                if len <= *max {
                    return Ok(());
                }
                (
                    format!("string of at most {} characters", max),
                    format!("length must be at most {}, got {}", max, len),
                    message,
                )
            }
            StringConstraint::Pattern { regex, message } => {
                if regex.is_match(value) {
                    return Ok(());
                }
                (
                    format!("string matching '{}'", regex.as_str()),
                    format!("must match pattern '{}'", regex.as_str()),
                    message,
                )
            }
        };

        let message = message.clone().unwrap_or(default_message);
        Err(ValidationFailure::new(path, correct_type, message).with_received(Some(raw)))
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<String, ValidationFailure> {
        let (raw, value) = match raw {
            Some(raw @ Value::String(s)) => (raw, s.as_str()),
            other => {
                let failure = ValidationFailure::type_mismatch(path, "string", other);
                return Err(match &self.type_error_message {
                    Some(message) => ValidationFailure {
                        message: message.clone(),
                        ..failure
                    },
                    None => failure,
                });
            }
        };

        let checks = self
            .constraints
            .iter()
            .map(|c| self.check_constraint(c, value, raw, path));

        match collect_all(checks) {
            Validation::Success(_) => Ok(value.to_string()),
            Validation::Failure(failures) if failures.len() == 1 => {
                Err(failures.into_vec().remove(0))
            }
            Validation::Failure(failures) => Err(ValidationFailure::new(
                path,
                self.type_name(),
                format!("string violated {} constraints", failures.len()),
            )
            .with_received(Some(raw))
            .with_errors(as_elements(failures))),
        }
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_at(raw, path).map(Value::String)
    }

    fn type_name(&self) -> String {
        "string".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string() {
        let schema = StringSchema::new();
        assert_eq!(schema.validate(&json!("hello"), "s"), Ok("hello".to_string()));

        let failure = schema.validate(&json!(1), "s").unwrap_err();
        assert_eq!(failure.correct_type, "string");
        assert!(failure.is_leaf());
    }

    #[test]
    fn test_single_violation_is_leaf() {
        let schema = StringSchema::new().min_len(5);

        let failure = schema.validate(&json!("hi"), "name").unwrap_err();
        assert!(failure.is_leaf());
        assert_eq!(failure.message, "length must be at least 5, got 2");
        assert_eq!(failure.correct_type, "string of at least 5 characters");
    }

    #[test]
    fn test_length_counts_characters() {
        let schema = StringSchema::new().max_len(3);
        assert!(schema.validate(&json!("äöü"), "s").is_ok());
    }

    #[test]
    fn test_multiple_violations_nest() {
        let schema = StringSchema::new()
            .min_len(5)
            .pattern(r"^\d+$")
            .unwrap();

        let failure = schema.validate(&json!("ab"), "code").unwrap_err();
        assert_eq!(failure.elements().len(), 2);
        assert_eq!(failure.message, "string violated 2 constraints");
    }

    #[test]
    fn test_custom_messages() {
        let schema = StringSchema::new()
            .error("callsign must be text")
            .min_len(3)
            .error("callsign too short");

        let failure = schema.validate(&json!(3), "callsign").unwrap_err();
        assert_eq!(failure.message, "callsign must be text");

        let failure = schema.validate(&json!("ab"), "callsign").unwrap_err();
        assert_eq!(failure.message, "callsign too short");
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(StringSchema::new().pattern("[unclosed").is_err());
    }
}
