//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] trait implemented by every schema
//! node, and the object-safe [`ValueValidator`] used where nodes with
//! different output types are composed (unions, intersections, object fields).

use std::sync::Arc;

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::path::FieldPath;

/// A schema node: a pure function from raw input to a typed value or a
/// [`ValidationFailure`].
///
/// Raw input is `Option<&Value>`; `None` stands for an absent value (a
/// missing object key), which only [`Schema::optional`](crate::Schema::optional)
/// and [`Schema::anything`](crate::Schema::anything) accept.
///
/// Schema nodes hold no per-validation state, so one value can be built once
/// and shared by reference for the lifetime of the process.
///
/// # Example
///
/// ```rust
/// use sortie::{Schema, SchemaLike};
/// use serde_json::json;
///
/// assert_eq!(Schema::number().validate(&json!(5), "x"), Ok(5.0));
///
/// let failure = Schema::number().validate(&json!("a"), "x").unwrap_err();
/// assert_eq!(failure.correct_type, "number");
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates raw input located at `path`.
    fn validate_at(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Self::Output, ValidationFailure>;

    /// Validates raw input and returns the result as a `serde_json::Value`.
    ///
    /// This lets nodes with different output types be stored together.
    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure>;

    /// Name of the type this node accepts, reported as `correct_type`.
    fn type_name(&self) -> String;

    /// Validates a present value bound to `key_name`.
    fn validate(&self, raw: &Value, key_name: &str) -> Result<Self::Output, ValidationFailure> {
        self.validate_at(Some(raw), &FieldPath::named(key_name))
    }

    /// Validates a possibly absent value bound to `key_name`.
    fn validate_option(
        &self,
        raw: Option<&Value>,
        key_name: &str,
    ) -> Result<Self::Output, ValidationFailure> {
        self.validate_at(raw, &FieldPath::named(key_name))
    }
}

/// A type-erased schema node producing `serde_json::Value`.
///
/// Every [`SchemaLike`] is a `ValueValidator`; the combinators that mix node
/// types store `Arc<dyn ValueValidator>`.
pub trait ValueValidator: Send + Sync {
    fn validate_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure>;

    fn value_type_name(&self) -> String;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_to_value(raw, path)
    }

    fn value_type_name(&self) -> String {
        self.type_name()
    }
}

/// An erased schema is itself a schema, so it can be nested anywhere a
/// concrete one can.
impl SchemaLike for Arc<dyn ValueValidator> {
    type Output = Value;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<Value, ValidationFailure> {
        (**self).validate_value(raw, path)
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        (**self).validate_value(raw, path)
    }

    fn type_name(&self) -> String {
        (**self).value_type_name()
    }
}
