//! Homogeneous collection schemas.
//!
//! [`ArraySchema`] applies one item schema to every array element;
//! [`ValuesSchema`] applies one schema to every value of a string-keyed map.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::ValidationFailure;
use crate::path::FieldPath;

use super::collect::{as_elements, as_fields, collect_all, collect_keyed};
use super::traits::SchemaLike;

/// A schema for arrays whose elements all match one item schema.
///
/// On failure the nested list holds only the failing elements' failures, in
/// element order. The list itself does not record positions; each element
/// failure's `path` (and `key_name`) carries its index instead.
///
/// # Example
///
/// ```rust
/// use sortie::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let hours = Schema::array_of(Schema::number());
///
/// assert_eq!(hours.validate(&json!([1, 2.5]), "hours"), Ok(vec![1.0, 2.5]));
///
/// let failure = hours.validate(&json!([1, "a"]), "hours").unwrap_err();
/// assert_eq!(failure.elements().len(), 1);
/// assert_eq!(failure.elements()[0].path.to_string(), "hours[1]");
/// ```
#[derive(Clone)]
pub struct ArraySchema<S> {
    item_schema: S,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates an array schema applying `item_schema` to every element.
    pub fn new(item_schema: S) -> Self {
        Self { item_schema }
    }

    fn validate_items<T>(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
        check: impl Fn(&S, Option<&Value>, &FieldPath) -> Result<T, ValidationFailure>,
    ) -> Result<Vec<T>, ValidationFailure> {
        let items = match raw {
            Some(Value::Array(items)) => items,
            other => return Err(ValidationFailure::type_mismatch(path, self.type_name(), other)),
        };

        let results = items
            .iter()
            .enumerate()
            .map(|(i, item)| check(&self.item_schema, Some(item), &path.element(i)));

        match collect_all(results) {
            Validation::Success(values) => Ok(values),
            Validation::Failure(failures) => {
                tracing::trace!(path = %path, failed = failures.len(), "array failed validation");
                Err(ValidationFailure::new(
                    path,
                    self.type_name(),
                    format!("{} of {} elements failed validation", failures.len(), items.len()),
                )
                .with_received(raw)
                .with_errors(as_elements(failures)))
            }
        }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn validate_at(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Self::Output, ValidationFailure> {
        self.validate_items(raw, path, S::validate_at)
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_items(raw, path, S::validate_to_value)
            .map(Value::Array)
    }

    fn type_name(&self) -> String {
        format!("array of {}", self.item_schema.type_name())
    }
}

/// A schema for string-keyed maps whose values all match one schema.
///
/// Unlike [`ArraySchema`], failures are keyed by the original map key.
///
/// # Example
///
/// ```rust
/// use sortie::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let attendance = Schema::values(Schema::boolean());
///
/// let failure = attendance
///     .validate(&json!({"ada": true, "grace": "yes"}), "attendance")
///     .unwrap_err();
/// assert!(failure.field("grace").is_some());
/// assert!(failure.field("ada").is_none());
/// ```
#[derive(Clone)]
pub struct ValuesSchema<S> {
    value_schema: S,
}

impl<S: SchemaLike> ValuesSchema<S> {
    /// Creates a map schema applying `value_schema` to every property value.
    pub fn new(value_schema: S) -> Self {
        Self { value_schema }
    }

    fn validate_entries<T>(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
        check: impl Fn(&S, Option<&Value>, &FieldPath) -> Result<T, ValidationFailure>,
    ) -> Result<IndexMap<String, T>, ValidationFailure> {
        let entries = match raw {
            Some(Value::Object(entries)) => entries,
            other => return Err(ValidationFailure::type_mismatch(path, self.type_name(), other)),
        };

        let results = entries.iter().map(|(key, value)| {
            (
                key.clone(),
                check(&self.value_schema, Some(value), &path.child(key)),
            )
        });

        match collect_keyed(results) {
            Validation::Success(values) => Ok(values),
            Validation::Failure(failures) => {
                tracing::trace!(path = %path, failed = failures.len(), "map failed validation");
                Err(ValidationFailure::new(
                    path,
                    self.type_name(),
                    format!("{} of {} entries failed validation", failures.len(), entries.len()),
                )
                .with_received(raw)
                .with_errors(as_fields(failures)))
            }
        }
    }
}

impl<S: SchemaLike> SchemaLike for ValuesSchema<S> {
    type Output = IndexMap<String, S::Output>;

    fn validate_at(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Self::Output, ValidationFailure> {
        self.validate_entries(raw, path, S::validate_at)
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_entries(raw, path, S::validate_to_value)
            .map(|entries| Value::Object(entries.into_iter().collect::<Map<String, Value>>()))
    }

    fn type_name(&self) -> String {
        format!("record of {}", self.value_schema.type_name())
    }
}
