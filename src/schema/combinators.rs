//! Schema combinators for composing validation logic.
//!
//! - [`OptionalSchema`]: the value may be absent
//! - [`OrSchema`]: exactly one alternative must match
//! - [`AnyOfSchema`]: at least one alternative must match
//! - [`AndSchema`]: every member must match; the raw input is returned
//!
//! # Example
//!
//! ```rust
//! use sortie::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let id = Schema::or("Id", vec![Schema::erase(Schema::string()), Schema::erase(Schema::number())]);
//!
//! assert_eq!(id.validate(&json!("a"), "id"), Ok(json!("a")));
//! assert_eq!(id.validate(&json!(7), "id"), Ok(json!(7)));
//! assert!(id.validate(&json!(true), "id").is_err());
//! ```

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{NestedFailures, ValidationFailure};
use crate::path::FieldPath;

use super::collect::{as_elements, collect_all};
use super::traits::{SchemaLike, ValueValidator};

/// Accepts an absent value as `None`; anything present, `null` included,
/// goes to the inner schema.
#[derive(Clone)]
pub struct OptionalSchema<S> {
    inner: S,
}

impl<S: SchemaLike> OptionalSchema<S> {
    /// Creates a schema that accepts absence or whatever `inner` accepts.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SchemaLike> SchemaLike for OptionalSchema<S> {
    type Output = Option<S::Output>;

    fn validate_at(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Self::Output, ValidationFailure> {
        match raw {
            None => Ok(None),
            Some(_) => self.inner.validate_at(raw, path).map(Some),
        }
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        match raw {
            None => Ok(Value::Null),
            Some(_) => self.inner.validate_to_value(raw, path),
        }
    }

    fn type_name(&self) -> String {
        format!("{} | undefined", self.inner.type_name())
    }
}

/// A union where exactly one alternative may match.
///
/// Every alternative is run. The value is accepted only when exactly one of
/// them succeeds, and that alternative's output is returned. A value matched
/// by two or more alternatives is rejected just like a value matched by none;
/// use [`AnyOfSchema`] for first-match union semantics.
///
/// The failure lists the failures of the alternatives that did not match, in
/// declaration order.
#[derive(Clone)]
pub struct OrSchema {
    type_name: String,
    alternatives: Vec<Arc<dyn ValueValidator>>,
}

impl OrSchema {
    /// Creates a union where exactly one alternative must match.
    pub fn new(type_name: impl Into<String>, alternatives: Vec<Arc<dyn ValueValidator>>) -> Self {
        Self {
            type_name: type_name.into(),
            alternatives,
        }
    }
}

impl SchemaLike for OrSchema {
    type Output = Value;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<Value, ValidationFailure> {
        let mut matched = Vec::new();
        let mut failures = Vec::new();

        for alternative in &self.alternatives {
            match alternative.validate_value(raw, path) {
                Ok(value) => matched.push(value),
                Err(failure) => failures.push(failure),
            }
        }

        if failures.len() + 1 == self.alternatives.len() {
            if let Some(value) = matched.pop() {
                return Ok(value);
            }
        }

        let message = match matched.len() {
            0 => format!("value did not match any alternative of {}", self.type_name),
            n => format!(
                "value matched {} alternatives of {}, expected exactly one",
                n, self.type_name
            ),
        };
        tracing::trace!(path = %path, matched = matched.len(), "union failed validation");

        Err(ValidationFailure::new(path, self.type_name.clone(), message)
            .with_received(raw)
            .with_errors(NestedFailures::Elements(failures)))
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_at(raw, path)
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }
}

/// A union where the first matching alternative wins.
#[derive(Clone)]
pub struct AnyOfSchema {
    type_name: String,
    alternatives: Vec<Arc<dyn ValueValidator>>,
}

impl AnyOfSchema {
    /// Creates a union where the first matching alternative wins.
    pub fn new(type_name: impl Into<String>, alternatives: Vec<Arc<dyn ValueValidator>>) -> Self {
        Self {
            type_name: type_name.into(),
            alternatives,
        }
    }
}

impl SchemaLike for AnyOfSchema {
    type Output = Value;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<Value, ValidationFailure> {
        let mut failures = Vec::new();

        for alternative in &self.alternatives {
            match alternative.validate_value(raw, path) {
                Ok(value) => return Ok(value),
                Err(failure) => failures.push(failure),
            }
        }

        Err(ValidationFailure::new(
            path,
            self.type_name.clone(),
            format!("value did not match any alternative of {}", self.type_name),
        )
        .with_received(raw)
        .with_errors(NestedFailures::Elements(failures)))
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_at(raw, path)
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }
}

/// An intersection check: every member must accept the value.
///
/// Members' outputs are discarded; on success the raw input is returned
/// unchanged (`null` when it was absent).
#[derive(Clone)]
pub struct AndSchema {
    type_name: String,
    members: Vec<Arc<dyn ValueValidator>>,
}

impl AndSchema {
    /// Creates an intersection where every member must match.
    pub fn new(type_name: impl Into<String>, members: Vec<Arc<dyn ValueValidator>>) -> Self {
        Self {
            type_name: type_name.into(),
            members,
        }
    }
}

impl SchemaLike for AndSchema {
    type Output = Value;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<Value, ValidationFailure> {
        let results = self
            .members
            .iter()
            .map(|member| member.validate_value(raw, path));

        match collect_all(results) {
            Validation::Success(_) => Ok(raw.cloned().unwrap_or(Value::Null)),
            Validation::Failure(failures) => Err(ValidationFailure::new(
                path,
                self.type_name.clone(),
                format!(
                    "value failed {} of {} members of {}",
                    failures.len(),
                    self.members.len(),
                    self.type_name
                ),
            )
            .with_received(raw)
            .with_errors(as_elements(failures))),
        }
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_at(raw, path)
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::leaf::{AnythingSchema, NumberSchema};
    use crate::schema::StringSchema;
    use serde_json::json;

    fn erase<S: SchemaLike + 'static>(schema: S) -> Arc<dyn ValueValidator> {
        Arc::new(schema)
    }

    #[test]
    fn test_optional_only_skips_absent() {
        let schema = OptionalSchema::new(NumberSchema);

        assert_eq!(schema.validate_option(None, "x"), Ok(None));
        assert_eq!(schema.validate(&json!(3), "x"), Ok(Some(3.0)));
        assert!(schema.validate(&json!(null), "x").is_err());
    }

    #[test]
    fn test_or_exactly_one_match() {
        let schema = OrSchema::new("T", vec![erase(StringSchema::new()), erase(NumberSchema)]);
        assert_eq!(schema.validate(&json!("a"), "x"), Ok(json!("a")));
    }

    #[test]
    fn test_or_rejects_when_two_alternatives_match() {
        let schema = OrSchema::new("T", vec![erase(AnythingSchema), erase(StringSchema::new())]);

        let failure = schema.validate(&json!("a"), "x").unwrap_err();
        assert_eq!(failure.message, "value matched 2 alternatives of T, expected exactly one");
        assert!(failure.elements().is_empty());
    }

    #[test]
    fn test_or_no_match_lists_every_failure() {
        let schema = OrSchema::new("T", vec![erase(StringSchema::new()), erase(NumberSchema)]);

        let failure = schema.validate(&json!(true), "x").unwrap_err();
        assert_eq!(failure.elements().len(), 2);
        assert_eq!(failure.correct_type, "T");
    }

    #[test]
    fn test_empty_or_never_matches() {
        let schema = OrSchema::new("never", Vec::new());
        assert!(schema.validate(&json!(1), "x").is_err());
    }

    #[test]
    fn test_any_of_first_match_wins() {
        let schema = AnyOfSchema::new("T", vec![erase(AnythingSchema), erase(StringSchema::new())]);
        assert_eq!(schema.validate(&json!("a"), "x"), Ok(json!("a")));
        assert!(AnyOfSchema::new("T", vec![erase(NumberSchema)]).validate(&json!("a"), "x").is_err());
    }

    #[test]
    fn test_and_returns_raw_input() {
        let schema = AndSchema::new(
            "short string",
            vec![erase(StringSchema::new()), erase(StringSchema::new().max_len(3))],
        );

        assert_eq!(schema.validate(&json!("abc"), "x"), Ok(json!("abc")));

        let failure = schema.validate(&json!("abcd"), "x").unwrap_err();
        assert_eq!(failure.elements().len(), 1);
        assert_eq!(failure.message, "value failed 1 of 2 members of short string");
    }
}
