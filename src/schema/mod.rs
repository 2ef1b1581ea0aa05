//! Declarative schemas that turn untrusted JSON into typed values.
//!
//! Every schema node validates synchronously and reports rejection as a
//! [`ValidationFailure`](crate::ValidationFailure) value; nothing panics.
//! Schemas hold no per-validation state, so build each shape once (for
//! example in a `static` initialised with `std::sync::LazyLock`) and share it.
//!
//! # Example
//!
//! ```rust
//! use sortie::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let event = Schema::object()
//!     .named("NewEvent")
//!     .field("name", Schema::string().min_len(1))
//!     .field("pickupTime", Schema::number())
//!     .field("teamId", Schema::optional(Schema::number()))
//!     .field("tags", Schema::array_of(Schema::string()));
//!
//! let valid = event.validate(&json!({
//!     "name": "Encampment",
//!     "pickupTime": 1700000000,
//!     "tags": ["summer"]
//! }), "body");
//! assert!(valid.is_ok());
//!
//! let failure = event.validate(&json!({"name": "", "tags": [3]}), "body").unwrap_err();
//! assert_eq!(failure.leaves().len(), 3);
//! ```

mod array;
mod collect;
mod combinators;
mod leaf;
mod literal;
mod object;
mod string;
mod traits;

use std::sync::Arc;

use serde_json::Value;

pub use array::{ArraySchema, ValuesSchema};
pub use combinators::{AndSchema, AnyOfSchema, OptionalSchema, OrSchema};
pub use leaf::{AnythingSchema, BooleanSchema, NullSchema, NumberSchema};
pub use literal::{EnumSchema, StrictValueSchema};
pub use object::{ObjectSchema, UnknownFields};
pub use string::StringSchema;
pub use traits::{SchemaLike, ValueValidator};

/// Entry point for building schemas.
///
/// Each factory returns a concrete node type; nodes compose by value, and
/// combinators that mix node types take erased nodes (see [`Schema::erase`]).
pub struct Schema;

impl Schema {
    /// Accepts only `null`.
    pub fn null() -> NullSchema {
        NullSchema
    }

    /// Accepts any value, absent included.
    pub fn anything() -> AnythingSchema {
        AnythingSchema
    }

    /// Accepts JSON numbers.
    pub fn number() -> NumberSchema {
        NumberSchema
    }

    /// Accepts strings; add constraints with the builder methods.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Accepts `true` / `false`.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema
    }

    /// Accepts an absent value as `None`, otherwise delegates to `inner`.
    pub fn optional<S: SchemaLike>(inner: S) -> OptionalSchema<S> {
        OptionalSchema::new(inner)
    }

    /// An object schema with no fields yet.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// An object schema built from a field-to-schema map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use sortie::{Schema, SchemaLike, ValueValidator};
    /// use serde_json::json;
    /// use std::sync::Arc;
    ///
    /// let mut fields: BTreeMap<&str, Arc<dyn ValueValidator>> = BTreeMap::new();
    /// fields.insert("id", Schema::erase(Schema::number()));
    /// fields.insert("name", Schema::erase(Schema::string()));
    ///
    /// let team = Schema::object_from(fields);
    /// assert!(team.validate(&json!({"id": 1, "name": "Alpha"}), "team").is_ok());
    /// ```
    pub fn object_from<I, K>(fields: I) -> ObjectSchema
    where
        I: IntoIterator<Item = (K, Arc<dyn ValueValidator>)>,
        K: Into<String>,
    {
        ObjectSchema::from_fields(fields)
    }

    /// Every field of `schema` fails with "field is required" when absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortie::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::required(Schema::object().field("name", Schema::string()));
    ///
    /// let failure = schema.validate(&json!({}), "").unwrap_err();
    /// assert_eq!(failure.field("name").unwrap().message, "field is required");
    /// ```
    pub fn required(schema: ObjectSchema) -> ObjectSchema {
        schema.required()
    }

    /// Only the fields of `schema` present in the input are validated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortie::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let update = Schema::partial(
    ///     Schema::object()
    ///         .field("name", Schema::string())
    ///         .field("hours", Schema::number()),
    /// );
    ///
    /// let changes = update.validate(&json!({"hours": 12}), "").unwrap();
    /// assert_eq!(changes.len(), 1);
    /// ```
    pub fn partial(schema: ObjectSchema) -> ObjectSchema {
        schema.partial()
    }

    /// Accepts the raw value of one of `members`, yielding that member.
    pub fn enumeration<T, I, V>(name: impl Into<String>, members: I) -> EnumSchema<T>
    where
        I: IntoIterator<Item = (V, T)>,
        V: Into<Value>,
    {
        EnumSchema::new(name, members)
    }

    /// Applies `item` to every array element.
    pub fn array_of<S: SchemaLike>(item: S) -> ArraySchema<S> {
        ArraySchema::new(item)
    }

    /// Applies `value` to every value of a string-keyed map.
    pub fn values<S: SchemaLike>(value: S) -> ValuesSchema<S> {
        ValuesSchema::new(value)
    }

    /// Union that succeeds iff exactly one alternative matches.
    ///
    /// A value accepted by two or more alternatives is rejected:
    ///
    /// ```rust
    /// use sortie::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let overlapping = Schema::or("T", vec![
    ///     Schema::erase(Schema::anything()),
    ///     Schema::erase(Schema::string()),
    /// ]);
    /// assert!(overlapping.validate(&json!("a"), "x").is_err());
    /// ```
    pub fn or(
        correct_type: impl Into<String>,
        alternatives: Vec<Arc<dyn ValueValidator>>,
    ) -> OrSchema {
        OrSchema::new(correct_type, alternatives)
    }

    /// Union that succeeds with the first matching alternative.
    pub fn any_of(
        correct_type: impl Into<String>,
        alternatives: Vec<Arc<dyn ValueValidator>>,
    ) -> AnyOfSchema {
        AnyOfSchema::new(correct_type, alternatives)
    }

    /// Intersection: every member must match; yields the raw input.
    pub fn and(correct_type: impl Into<String>, members: Vec<Arc<dyn ValueValidator>>) -> AndSchema {
        AndSchema::new(correct_type, members)
    }

    /// Accepts exactly `value`.
    pub fn strict_value(value: impl Into<Value>) -> StrictValueSchema {
        StrictValueSchema::new(value)
    }

    /// Accepts exactly one of `values`: an [`or`](Schema::or) over
    /// [`strict_value`](Schema::strict_value) checks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortie::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let status = Schema::one_of_strict("Status", ["draft", "published"]);
    /// assert!(status.validate(&json!("draft"), "status").is_ok());
    /// assert!(status.validate(&json!("deleted"), "status").is_err());
    /// ```
    pub fn one_of_strict<I, V>(correct_type: impl Into<String>, values: I) -> OrSchema
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let alternatives = values
            .into_iter()
            .map(|value| Self::erase(StrictValueSchema::new(value)))
            .collect();
        OrSchema::new(correct_type, alternatives)
    }

    /// Erases a schema's output type so it can sit beside other node types.
    pub fn erase<S: SchemaLike + 'static>(schema: S) -> Arc<dyn ValueValidator> {
        Arc::new(schema)
    }
}
