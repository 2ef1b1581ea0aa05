//! Integration tests for string constraints.

use serde_json::json;
use sortie::{Schema, SchemaLike};

#[test]
fn test_unconstrained_string() {
    let schema = Schema::string();
    assert_eq!(schema.validate(&json!(""), "s"), Ok(String::new()));
    assert_eq!(schema.validate(&json!(3), "s").unwrap_err().correct_type, "string");
}

#[test]
fn test_min_len_counts_characters() {
    let schema = Schema::string().min_len(3);

    assert!(schema.validate(&json!("été"), "s").is_ok());

    let failure = schema.validate(&json!("ab"), "s").unwrap_err();
    assert_eq!(failure.correct_type, "string of at least 3 characters");
    assert_eq!(failure.message, "length must be at least 3, got 2");
    assert_eq!(failure.value_received, Some(json!("ab")));
}

#[test]
fn test_max_len() {
    let failure = Schema::string()
        .max_len(2)
        .validate(&json!("abc"), "s")
        .unwrap_err();
    assert_eq!(failure.message, "length must be at most 2, got 3");
}

#[test]
fn test_pattern() {
    let schema = Schema::string().pattern(r"^\d{4}$").unwrap();

    assert!(schema.validate(&json!("2024"), "year").is_ok());

    let failure = schema.validate(&json!("24"), "year").unwrap_err();
    assert_eq!(failure.message, r"must match pattern '^\d{4}$'");
}

#[test]
fn test_invalid_pattern_is_an_error() {
    assert!(Schema::string().pattern("(unclosed").is_err());
}

#[test]
fn test_every_violation_is_reported() {
    let schema = Schema::string().min_len(5).pattern("^[a-z]+$").unwrap();

    let failure = schema.validate(&json!("AB"), "code").unwrap_err();
    assert_eq!(failure.message, "string violated 2 constraints");
    assert_eq!(failure.correct_type, "string");
    assert_eq!(failure.elements().len(), 2);
    assert_eq!(failure.leaves().len(), 2);
}

#[test]
fn test_custom_messages() {
    let schema = Schema::string()
        .error("name must be text")
        .min_len(1)
        .error("name cannot be empty");

    assert_eq!(
        schema.validate(&json!(1), "name").unwrap_err().message,
        "name must be text"
    );
    assert_eq!(
        schema.validate(&json!(""), "name").unwrap_err().message,
        "name cannot be empty"
    );
}
