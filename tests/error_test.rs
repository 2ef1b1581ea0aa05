//! Integration tests for ValidationFailure.

use indexmap::IndexMap;
use serde_json::json;
use sortie::{FieldPath, NestedFailures, Schema, SchemaLike, ValidationFailure};

#[test]
fn test_failure_full_context() {
    let failure = ValidationFailure::new(&FieldPath::named("body").child("email"), "string", "bad")
        .with_received(Some(&json!(12)));

    assert_eq!(failure.key_name, "email");
    assert_eq!(failure.path.to_string(), "body.email");
    assert_eq!(failure.correct_type, "string");
    assert_eq!(failure.message, "bad");
    assert_eq!(failure.value_received, Some(json!(12)));
    assert!(failure.is_leaf());
}

#[test]
fn test_nested_lookup() {
    let mut fields = IndexMap::new();
    fields.insert(
        "name".to_string(),
        ValidationFailure::new(&FieldPath::named("name"), "string", "field is required"),
    );
    let parent = ValidationFailure::new(&FieldPath::root(), "object", "object was unable to be verified")
        .with_errors(NestedFailures::Fields(fields));

    assert!(!parent.is_leaf());
    assert_eq!(parent.field("name").unwrap().message, "field is required");
    assert!(parent.field("other").is_none());
    assert!(parent.elements().is_empty());
}

#[test]
fn test_display_renders_tree() {
    let schema = Schema::object()
        .named("Shift")
        .field("crew", Schema::array_of(Schema::string()))
        .field("hours", Schema::number());

    let failure = schema
        .validate(&json!({"crew": ["ada", 3]}), "shift")
        .unwrap_err();

    let expected = [
        r#"shift: object was unable to be verified (expected: Shift) (received: {"crew":["ada",3]})"#,
        r#"  shift.crew: 1 of 2 elements failed validation (expected: array of string) (received: ["ada",3])"#,
        "    shift.crew[1]: expected string, received number (expected: string) (received: 3)",
        "  shift.hours: expected number, received undefined (expected: number) (received: undefined)",
    ]
    .join("\n");

    assert_eq!(failure.to_string(), expected);
}

#[test]
fn test_root_failure_display() {
    let failure = Schema::boolean().validate(&json!("yes"), "").unwrap_err();
    assert_eq!(
        failure.to_string(),
        r#"(root): expected boolean, received string (expected: boolean) (received: "yes")"#
    );
}

#[test]
fn test_failure_is_std_error() {
    fn parse(raw: &serde_json::Value) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Schema::number().validate(raw, "amount")?)
    }

    let error = parse(&json!("ten")).unwrap_err();
    assert!(error.to_string().starts_with("amount: expected number"));
}

#[test]
fn test_leaves_flatten_in_order() {
    let schema = Schema::object()
        .field("a", Schema::number())
        .field("b", Schema::array_of(Schema::boolean()))
        .field("c", Schema::string());

    let failure = schema
        .validate(&json!({"a": "x", "b": [true, 1, 2], "c": "ok"}), "")
        .unwrap_err();

    let paths: Vec<String> = failure.leaves().iter().map(|f| f.path.to_string()).collect();
    assert_eq!(paths, vec!["a", "b[1]", "b[2]"]);
}
