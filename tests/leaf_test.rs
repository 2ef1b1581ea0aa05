//! Integration tests for the leaf schemas.

use serde_json::{json, Value};
use sortie::{Schema, SchemaLike};

#[test]
fn test_number_accepts_numbers() {
    assert_eq!(Schema::number().validate(&json!(5), "x"), Ok(5.0));
    assert_eq!(Schema::number().validate(&json!(-0.5), "x"), Ok(-0.5));
}

#[test]
fn test_number_rejects_strings() {
    let failure = Schema::number().validate(&json!("a"), "x").unwrap_err();

    assert_eq!(failure.correct_type, "number");
    assert_eq!(failure.key_name, "x");
    assert_eq!(failure.value_received, Some(json!("a")));
    assert_eq!(failure.message, "expected number, received string");
    assert!(failure.errors.is_none());
}

#[test]
fn test_absent_value_is_undefined() {
    let failure = Schema::boolean().validate_option(None, "active").unwrap_err();

    assert_eq!(failure.correct_type, "boolean");
    assert_eq!(failure.value_received, None);
    assert_eq!(failure.message, "expected boolean, received undefined");
}

#[test]
fn test_null_schema() {
    assert_eq!(Schema::null().validate(&Value::Null, "deletedAt"), Ok(()));

    let failure = Schema::null().validate(&json!(0), "deletedAt").unwrap_err();
    assert_eq!(failure.correct_type, "null");
}

#[test]
fn test_string_and_boolean() {
    assert_eq!(Schema::string().validate(&json!("ok"), "s"), Ok("ok".to_string()));
    assert_eq!(Schema::boolean().validate(&json!(false), "b"), Ok(false));

    assert_eq!(
        Schema::string().validate(&json!(null), "s").unwrap_err().message,
        "expected string, received null"
    );
    assert_eq!(
        Schema::boolean().validate(&json!("true"), "b").unwrap_err().correct_type,
        "boolean"
    );
}

#[test]
fn test_anything_accepts_everything() {
    let schema = Schema::anything();

    for raw in [json!(null), json!(1), json!("a"), json!([1]), json!({"k": 1})] {
        assert_eq!(schema.validate(&raw, "any"), Ok(raw.clone()));
    }
    assert_eq!(schema.validate_option(None, "any"), Ok(Value::Null));
}
