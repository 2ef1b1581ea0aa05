//! Exact-value schemas: single literals and enumerations.

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::path::FieldPath;

use super::traits::SchemaLike;

/// Accepts exactly one JSON value. Numbers compare by value, so `1` and
/// `1.0` are the same literal.
#[derive(Debug, Clone)]
pub struct StrictValueSchema {
    expected: Value,
}

/// Exact equality, except that two numbers are equal when their values are.
fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) if l.is_f64() || r.is_f64() => {
            l.as_f64() == r.as_f64()
        }
        _ => left == right,
    }
}

impl StrictValueSchema {
    /// Creates a schema accepting only `expected`.
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl SchemaLike for StrictValueSchema {
    type Output = Value;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<Value, ValidationFailure> {
        match raw {
            Some(value) if strict_eq(value, &self.expected) => Ok(value.clone()),
            other => Err(ValidationFailure::new(
                path,
                self.type_name(),
                format!("expected exactly {}", self.expected),
            )
            .with_received(other)),
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
        self.expected.to_string()
    }
}

/// Accepts the raw value of one enumeration member and yields the member.
///
/// # Example
///
/// ```rust
/// use sortie::{Schema, SchemaLike};
/// use serde_json::json;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Role {
///     Pilot,
///     Navigator,
/// }
///
/// let role = Schema::enumeration("Role", [("pilot", Role::Pilot), ("navigator", Role::Navigator)]);
///
/// assert_eq!(role.validate(&json!("pilot"), "role"), Ok(Role::Pilot));
/// assert_eq!(role.validate(&json!("cook"), "role").unwrap_err().correct_type, "Role");
/// ```
#[derive(Debug, Clone)]
pub struct EnumSchema<T> {
    name: String,
    members: Vec<(Value, T)>,
}

impl<T> EnumSchema<T> {
    /// Creates an enumeration named `name` from `(raw value, member)` pairs.
    pub fn new<I, V>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = (V, T)>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(|(v, t)| (v.into(), t)).collect(),
        }
    }

    fn member_index(&self, raw: Option<&Value>) -> Option<usize> {
        raw.and_then(|value| {
            self.members
                .iter()
                .position(|(member, _)| strict_eq(member, value))
        })
    }

    fn not_a_member(&self, raw: Option<&Value>, path: &FieldPath) -> ValidationFailure {
        ValidationFailure::new(
            path,
            self.name.clone(),
            format!("value is not a member of {}", self.name),
        )
        .with_received(raw)
    }
}

impl<T: Clone + Send + Sync> SchemaLike for EnumSchema<T> {
    type Output = T;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<T, ValidationFailure> {
        self.member_index(raw)
            .map(|i| self.members[i].1.clone())
            .ok_or_else(|| self.not_a_member(raw, path))
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.member_index(raw)
            .map(|i| self.members[i].0.clone())
            .ok_or_else(|| self.not_a_member(raw, path))
    }

    fn type_name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_value_is_exact() {
        let schema = StrictValueSchema::new("admin");

        assert_eq!(schema.validate(&json!("admin"), "role"), Ok(json!("admin")));

        let failure = schema.validate(&json!("Admin"), "role").unwrap_err();
        assert_eq!(failure.correct_type, "\"admin\"");
        assert_eq!(failure.message, "expected exactly \"admin\"");
    }

    #[test]
    fn test_strict_number_does_not_match_string() {
        let schema = StrictValueSchema::new(3);
        assert!(schema.validate(&json!("3"), "x").is_err());
        assert!(schema.validate_option(None, "x").is_err());
    }

    #[test]
    fn test_numeric_enum() {
        let schema = EnumSchema::new("Level", [(0, "none"), (1, "member"), (2, "manager")]);

        assert_eq!(schema.validate(&json!(1), "level"), Ok("member"));
        assert_eq!(
            schema.validate_to_value(Some(&json!(2)), &FieldPath::root()),
            Ok(json!(2))
        );
        assert!(schema.validate(&json!(3), "level").is_err());
    }

    #[test]
    fn test_strict_eq_compares_numbers_by_value() {
        assert!(strict_eq(&json!(1), &json!(1.0)));
        assert!(strict_eq(&json!(-4), &json!(-4.0)));
        assert!(!strict_eq(&json!(1), &json!(1.5)));
        assert!(!strict_eq(&json!(1), &json!("1")));
        assert!(strict_eq(&json!([1, 2]), &json!([1, 2])));
    }
}
