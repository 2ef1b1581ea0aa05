//! # Sortie
//!
//! Error-as-value building blocks for services that take untrusted input:
//! presence/absence and success/failure combinators, asynchronous pipelines
//! with a single failure channel, and declarative schemas that validate raw
//! JSON into typed values.
//!
//! ## Overview
//!
//! Untrusted input enters through a [`Schema`], producing a
//! `Result<T, ValidationFailure>`. Business logic composes `Result` and
//! `Option` values with `map`, `and_then` and the filters from
//! [`ResultExt`] / [`OptionExt`]. I/O-bound work is wrapped in an
//! [`AsyncResult`], which turns panics and rejected pending values into the
//! same failure channel, so callers never branch on "did this panic" versus
//! "did this return an error".
//!
//! ## Core Types
//!
//! - [`OptionExt`], [`ResultExt`]: combinators missing from the standard types
//! - [`AsyncResult`]: a pending `Result` plus an [`ErrorValue`] for faults
//! - [`Schema`]: entry point for building schemas
//! - [`ValidationFailure`]: a structured rejection, possibly nested
//! - [`FieldPath`]: location of a value inside the validated input (e.g. `roster[1].name`)
//!
//! ## Example
//!
//! ```rust
//! use sortie::{ResultExt, Schema, SchemaLike};
//! use serde_json::json;
//!
//! let shift = Schema::object()
//!     .field("name", Schema::string().min_len(1))
//!     .field("hours", Schema::number());
//!
//! let hours = shift
//!     .validate(&json!({"name": "night", "hours": 9}), "shift")
//!     .map_err(|failure| failure.to_string())
//!     .and_then(|fields| fields["hours"].as_f64().ok_or_else(|| "hours".to_string()))
//!     .filter_or(|hours| *hours <= 12.0, "shift too long".to_string());
//!
//! assert_eq!(hours, Ok(9.0));
//! ```

pub mod error;
pub mod option;
pub mod path;
pub mod result;
pub mod schema;

#[cfg(feature = "async")]
pub mod async_result;

pub use error::{NestedFailures, ValidationFailure};
pub use option::OptionExt;
pub use path::{FieldPath, PathSegment};
pub use result::ResultExt;
pub use schema::{
    AndSchema, AnyOfSchema, AnythingSchema, ArraySchema, BooleanSchema, EnumSchema, NullSchema,
    NumberSchema, ObjectSchema, OptionalSchema, OrSchema, Schema, SchemaLike, StrictValueSchema,
    StringSchema, UnknownFields, ValueValidator, ValuesSchema,
};

#[cfg(feature = "async")]
pub use async_result::{AsyncResult, Check, ErrorValue, Fault, Rejected, Step};
