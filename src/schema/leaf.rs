//! Leaf schemas that check the runtime type of a single value.
//!
//! [`NullSchema`], [`AnythingSchema`], [`NumberSchema`] and [`BooleanSchema`]
//! accept exactly one JSON type each (any value, for `AnythingSchema`).
//! Strings live in [`StringSchema`](super::StringSchema) because they carry
//! constraints.

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::path::FieldPath;

use super::traits::SchemaLike;

/// Accepts only `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSchema;

impl SchemaLike for NullSchema {
    type Output = ();

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<(), ValidationFailure> {
        match raw {
            Some(Value::Null) => Ok(()),
            other => Err(ValidationFailure::type_mismatch(path, self.type_name(), other)),
        }
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_at(raw, path).map(|()| Value::Null)
    }

    fn type_name(&self) -> String {
        "null".to_string()
    }
}

/// Accepts any value, including an absent one (which yields `null`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AnythingSchema;

impl SchemaLike for AnythingSchema {
    type Output = Value;

    fn validate_at(&self, raw: Option<&Value>, _path: &FieldPath) -> Result<Value, ValidationFailure> {
        Ok(raw.cloned().unwrap_or(Value::Null))
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_at(raw, path)
    }

    fn type_name(&self) -> String {
        "any".to_string()
    }
}

/// Accepts JSON numbers, integer or floating point.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSchema;

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<f64, ValidationFailure> {
        match raw.and_then(Value::as_f64) {
            Some(n) => Ok(n),
            None => Err(ValidationFailure::type_mismatch(path, self.type_name(), raw)),
        }
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        // Hand back the original number so integers stay integers.
        self.validate_at(raw, path)
            .map(|_| raw.cloned().unwrap_or(Value::Null))
    }

    fn type_name(&self) -> String {
        "number".to_string()
    }
}

/// Accepts `true` and `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanSchema;

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<bool, ValidationFailure> {
        match raw {
            Some(Value::Bool(b)) => Ok(*b),
            other => Err(ValidationFailure::type_mismatch(path, self.type_name(), other)),
        }
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_at(raw, path).map(Value::Bool)
    }

    fn type_name(&self) -> String {
        "boolean".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_integers_and_floats() {
        assert_eq!(NumberSchema.validate(&json!(5), "x"), Ok(5.0));
        assert_eq!(NumberSchema.validate(&json!(2.5), "x"), Ok(2.5));
        assert_eq!(
            NumberSchema.validate_to_value(Some(&json!(5)), &FieldPath::root()),
            Ok(json!(5))
        );
    }

    #[test]
    fn test_number_rejects_numeric_strings() {
        let failure = NumberSchema.validate(&json!("5"), "x").unwrap_err();
        assert_eq!(failure.correct_type, "number");
        assert_eq!(failure.key_name, "x");
        assert_eq!(failure.value_received, Some(json!("5")));
    }

    #[test]
    fn test_null_rejects_absent_value() {
        assert_eq!(NullSchema.validate(&json!(null), "x"), Ok(()));

        let failure = NullSchema.validate_option(None, "x").unwrap_err();
        assert_eq!(failure.message, "expected null, received undefined");
    }

    #[test]
    fn test_boolean() {
        assert_eq!(BooleanSchema.validate(&json!(false), "flag"), Ok(false));
        assert!(BooleanSchema.validate(&json!(0), "flag").is_err());
    }

    #[test]
    fn test_anything_accepts_everything() {
        for raw in [json!(null), json!(1), json!("s"), json!([1]), json!({"a": 1})] {
            assert_eq!(AnythingSchema.validate(&raw, "x"), Ok(raw.clone()));
        }
        assert_eq!(AnythingSchema.validate_option(None, "x"), Ok(Value::Null));
    }
}
