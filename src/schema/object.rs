//! Object schema validation.
//!
//! This module provides [`ObjectSchema`], built from a named set of per-field
//! schemas, together with the `required` and `partial` transformations that
//! change how absent fields are treated.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::ValidationFailure;
use crate::path::FieldPath;

use super::collect::{as_fields, collect_keyed};
use super::traits::{SchemaLike, ValueValidator};

/// How properties not declared in the schema are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Drop them from the validated object (default).
    #[default]
    Strip,
    /// Copy them into the validated object unchecked.
    Keep,
    /// Report each one as a failure.
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldPresence {
    /// Every declared field is validated, absent ones included.
    Declared,
    /// Only the declared fields present in the input are validated.
    PresentOnly,
}

/// A schema for objects with a fixed set of named fields.
///
/// Each field schema is run against the corresponding raw property. On
/// success the result is a freshly built object holding every field's
/// validated value; fields whose raw value was absent (and whose schema
/// accepted that, like [`Schema::optional`](crate::Schema::optional)) are
/// left out. On failure every failing field is reported, keyed by name,
/// under a single "object was unable to be verified" failure.
///
/// # Example
///
/// ```rust
/// use sortie::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let member = Schema::object()
///     .named("Member")
///     .field("name", Schema::string())
///     .field("flightHours", Schema::number())
///     .field("nickname", Schema::optional(Schema::string()));
///
/// let valid = member.validate(&json!({"name": "Ada", "flightHours": 120}), "member");
/// assert!(valid.is_ok());
///
/// let failure = member.validate(&json!({"name": 4}), "member").unwrap_err();
/// assert_eq!(failure.correct_type, "Member");
/// assert!(failure.field("name").is_some());
/// assert!(failure.field("flightHours").is_some());
/// ```
#[derive(Clone)]
pub struct ObjectSchema {
    fields: IndexMap<String, Arc<dyn ValueValidator>>,
    unknown_fields: UnknownFields,
    presence: FieldPresence,
    type_name: String,
}

impl ObjectSchema {
    /// Creates an object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            unknown_fields: UnknownFields::Strip,
            presence: FieldPresence::Declared,
            type_name: "object".to_string(),
        }
    }

    /// Builds an object schema directly from a field-to-schema map.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Arc<dyn ValueValidator>)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::new()
        }
    }

    /// Adds (or replaces) a field.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(name.into(), Arc::new(schema));
        self
    }

    /// Sets the type name reported as `correct_type` when the object fails.
    pub fn named(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Configures how undeclared properties are handled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortie::{Schema, SchemaLike, UnknownFields};
    /// use serde_json::json;
    ///
    /// let strict = Schema::object()
    ///     .field("name", Schema::string())
    ///     .unknown_fields(UnknownFields::Deny);
    ///
    /// let failure = strict.validate(&json!({"name": "Ada", "rank": 3}), "").unwrap_err();
    /// assert_eq!(failure.field("rank").map(|f| f.message.as_str()), Some("unknown field 'rank'"));
    /// ```
    pub fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Makes every field fail with "field is required" when its raw value is
    /// absent, instead of deferring to the field schema.
    pub fn required(mut self) -> Self {
        self.fields = self
            .fields
            .into_iter()
            .map(|(name, schema)| {
                let wrapped: Arc<dyn ValueValidator> = Arc::new(RequiredField(schema));
                (name, wrapped)
            })
            .collect();
        self
    }

    /// Validates only the declared fields present in the input; absent
    /// fields are left out of both the result and the failure set.
    pub fn partial(mut self) -> Self {
        self.presence = FieldPresence::PresentOnly;
        self
    }

    /// Returns the declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn validate_object(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Map<String, Value>, ValidationFailure> {
        let obj = match raw {
            Some(Value::Object(obj)) => obj,
            other => {
                return Err(ValidationFailure::type_mismatch(
                    path,
                    self.type_name.clone(),
                    other,
                ))
            }
        };

        let declared = self
            .fields
            .iter()
            .filter(|(name, _)| {
                self.presence == FieldPresence::Declared || obj.contains_key(name.as_str())
            })
            .map(|(name, schema)| {
                let field_raw = obj.get(name);
                let result = schema
                    .validate_value(field_raw, &path.child(name))
                    .map(|value| field_raw.map(|_| value));
                (name.clone(), result)
            });

        let undeclared = obj
            .iter()
            .filter(|(key, _)| !self.fields.contains_key(key.as_str()))
            .filter_map(|(key, value)| match self.unknown_fields {
                UnknownFields::Strip => None,
                UnknownFields::Keep => Some((key.clone(), Ok(Some(value.clone())))),
                UnknownFields::Deny => Some((
                    key.clone(),
                    Err(ValidationFailure::new(
                        &path.child(key),
                        "undefined",
                        format!("unknown field '{}'", key),
                    )
                    .with_received(Some(value))),
                )),
            });

        match collect_keyed(declared.chain(undeclared)) {
            Validation::Success(values) => Ok(values
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v)))
                .collect()),
            Validation::Failure(failures) => {
                tracing::trace!(path = %path, failed = failures.len(), "object failed validation");
                Err(ValidationFailure::new(
                    path,
                    self.type_name.clone(),
                    "object was unable to be verified",
                )
                .with_received(raw)
                .with_errors(as_fields(failures)))
            }
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate_at(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Self::Output, ValidationFailure> {
        self.validate_object(raw, path)
    }

    fn validate_to_value(
        &self,
        raw: Option<&Value>,
        path: &FieldPath,
    ) -> Result<Value, ValidationFailure> {
        self.validate_object(raw, path).map(Value::Object)
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }
}

/// A field schema that rejects absent values before delegating.
struct RequiredField(Arc<dyn ValueValidator>);

impl SchemaLike for RequiredField {
    type Output = Value;

    fn validate_at(&self, raw: Option<&Value>, path: &FieldPath) -> Result<Value, ValidationFailure> {
        match raw {
            None => Err(ValidationFailure::new(
                path,
                self.0.value_type_name(),
                "field is required",
            )),
            Some(_) => self.0.validate_value(raw, path),
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
        self.0.value_type_name()
    }
}
