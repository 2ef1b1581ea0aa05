//! The structured, recursive validation failure.
//!
//! This module provides [`ValidationFailure`] for a single rejected value and
//! [`NestedFailures`] for the children a combinator node reports under it.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

use crate::path::FieldPath;

/// A validation failure with full context.
///
/// `ValidationFailure` records:
/// - **key_name**: the field (or element) name the failing value was bound to
/// - **correct_type**: the name of the type the schema node expected
/// - **message**: human-readable description of the failure
/// - **value_received**: the raw input, `None` when the value was absent
/// - **errors**: the children's failures for combinator nodes, `None` for leaves
/// - **path**: the location of the value relative to the validation root
///
/// # Example
///
/// ```rust
/// use sortie::{FieldPath, ValidationFailure};
/// use serde_json::json;
///
/// let failure = ValidationFailure::type_mismatch(
///     &FieldPath::named("callsign"),
///     "string",
///     Some(&json!(7)),
/// );
///
/// assert_eq!(failure.key_name, "callsign");
/// assert_eq!(failure.correct_type, "string");
/// assert_eq!(failure.value_received, Some(json!(7)));
/// assert!(failure.is_leaf());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// Name the failing value was bound to.
    pub key_name: String,
    /// Name of the expected type.
    pub correct_type: String,
    /// Human-readable error message.
    pub message: String,
    /// The raw value that was received; `None` means it was absent.
    pub value_received: Option<Value>,
    /// Nested failures reported by combinator nodes.
    pub errors: Option<NestedFailures>,
    /// Location of the failing value from the validation root.
    pub path: FieldPath,
}

/// The children's failures nested under a combinator node's failure.
///
/// Array-like nodes (`array_of`, `or`, `and`) report an ordered list;
/// object-like nodes (`object`, `partial`, `required`, `values`) report a
/// mapping keyed by field name or map key, in input order.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedFailures {
    /// Ordered failures of array elements or union/intersection members.
    Elements(Vec<ValidationFailure>),
    /// Failures keyed by field name or map key.
    Fields(IndexMap<String, ValidationFailure>),
}

impl ValidationFailure {
    /// Creates a leaf failure at `path` with no received value recorded.
    pub fn new(
        path: &FieldPath,
        correct_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key_name: path.key_name(),
            correct_type: correct_type.into(),
            message: message.into(),
            value_received: None,
            errors: None,
            path: path.clone(),
        }
    }

    /// Creates the failure a leaf node reports when the runtime type of
    /// `raw` does not match `correct_type`.
    pub fn type_mismatch(
        path: &FieldPath,
        correct_type: impl Into<String>,
        raw: Option<&Value>,
    ) -> Self {
        let correct_type = correct_type.into();
        let message = format!(
            "expected {}, received {}",
            correct_type,
            received_type_name(raw)
        );
        Self::new(path, correct_type, message).with_received(raw)
    }

    /// Records the raw value that failed validation.
    pub fn with_received(mut self, raw: Option<&Value>) -> Self {
        self.value_received = raw.cloned();
        self
    }

    /// Attaches the children's failures.
    pub fn with_errors(mut self, errors: NestedFailures) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Returns true when no nested failures are attached.
    pub fn is_leaf(&self) -> bool {
        self.errors.is_none()
    }

    /// Looks up the nested failure for a field or map key.
    pub fn field(&self, name: &str) -> Option<&ValidationFailure> {
        match &self.errors {
            Some(NestedFailures::Fields(fields)) => fields.get(name),
            _ => None,
        }
    }

    /// Returns the nested list failures, or an empty slice for leaves and
    /// keyed failures.
    pub fn elements(&self) -> &[ValidationFailure] {
        match &self.errors {
            Some(NestedFailures::Elements(items)) => items,
            _ => &[],
        }
    }

    /// Flattens the tree into its leaf failures, depth first, in order.
    ///
    /// A combinator failure with an empty nested set (an `or` where several
    /// alternatives matched) counts as a leaf.
    pub fn leaves(&self) -> Vec<&ValidationFailure> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ValidationFailure>) {
        match &self.errors {
            Some(nested) if !nested.is_empty() => {
                for child in nested.iter() {
                    child.collect_leaves(out);
                }
            }
            _ => out.push(self),
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let location = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(
            f,
            "{:indent$}{}: {} (expected: {})",
            "",
            location,
            self.message,
            self.correct_type,
            indent = depth * 2
        )?;

        match &self.value_received {
            Some(value) => write!(f, " (received: {})", value)?,
            None => write!(f, " (received: undefined)")?,
        }

        if let Some(nested) = &self.errors {
            for child in nested.iter() {
                writeln!(f)?;
                child.fmt_indented(f, depth + 1)?;
            }
        }

        Ok(())
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl std::error::Error for ValidationFailure {}

impl NestedFailures {
    /// Returns the number of nested failures.
    pub fn len(&self) -> usize {
        match self {
            NestedFailures::Elements(items) => items.len(),
            NestedFailures::Fields(fields) => fields.len(),
        }
    }

    /// Returns `true` when nothing is nested.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the nested failures in order, dropping keys.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &ValidationFailure> + '_> {
        match self {
            NestedFailures::Elements(items) => Box::new(items.iter()),
            NestedFailures::Fields(fields) => Box::new(fields.values()),
        }
    }
}

/// Returns the JSON type name of a raw value, `"undefined"` when absent.
pub(crate) fn received_type_name(raw: Option<&Value>) -> &'static str {
    match raw {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

// Failures cross thread and task boundaries inside AsyncResult pipelines.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationFailure>();
    assert_sync::<ValidationFailure>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(name: &str, correct_type: &str) -> ValidationFailure {
        ValidationFailure::type_mismatch(&FieldPath::named(name), correct_type, Some(&json!(null)))
    }

    #[test]
    fn test_type_mismatch_message() {
        let failure =
            ValidationFailure::type_mismatch(&FieldPath::named("age"), "number", Some(&json!("x")));

        assert_eq!(failure.key_name, "age");
        assert_eq!(failure.message, "expected number, received string");
        assert_eq!(failure.value_received, Some(json!("x")));
    }

    #[test]
    fn test_type_mismatch_on_absent_value() {
        let failure = ValidationFailure::type_mismatch(&FieldPath::named("age"), "number", None);

        assert_eq!(failure.message, "expected number, received undefined");
        assert!(failure.value_received.is_none());
    }

    #[test]
    fn test_field_lookup() {
        let mut fields = IndexMap::new();
        fields.insert("name".to_string(), leaf("name", "string"));

        let failure = ValidationFailure::new(&FieldPath::root(), "Member", "object was unable to be verified")
            .with_errors(NestedFailures::Fields(fields));

        assert_eq!(failure.field("name").map(|f| f.correct_type.as_str()), Some("string"));
        assert!(failure.field("rank").is_none());
        assert!(failure.elements().is_empty());
    }

    #[test]
    fn test_leaves_depth_first() {
        let inner = ValidationFailure::new(&FieldPath::named("a"), "array", "bad elements")
            .with_errors(NestedFailures::Elements(vec![leaf("a", "number"), leaf("a", "number")]));

        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), inner);
        fields.insert("b".to_string(), leaf("b", "string"));

        let root = ValidationFailure::new(&FieldPath::root(), "object", "object was unable to be verified")
            .with_errors(NestedFailures::Fields(fields));

        let types: Vec<_> = root.leaves().iter().map(|f| f.correct_type.clone()).collect();
        assert_eq!(types, vec!["number", "number", "string"]);
    }

    #[test]
    fn test_empty_nested_counts_as_leaf() {
        let failure = ValidationFailure::new(&FieldPath::root(), "T", "ambiguous")
            .with_errors(NestedFailures::Elements(Vec::new()));

        assert!(!failure.is_leaf());
        assert_eq!(failure.leaves().len(), 1);
    }

    #[test]
    fn test_display_renders_tree() {
        let mut fields = IndexMap::new();
        fields.insert("name".to_string(), leaf("name", "string"));

        let root = ValidationFailure::new(&FieldPath::root(), "Member", "object was unable to be verified")
            .with_received(Some(&json!({"name": null})))
            .with_errors(NestedFailures::Fields(fields));

        let display = root.to_string();
        assert!(display.starts_with("(root): object was unable to be verified (expected: Member)"));
        assert!(display.contains("\n  name: expected string, received null (expected: string) (received: null)"));
    }
}
