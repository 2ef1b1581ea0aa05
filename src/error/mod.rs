//! Failure types produced by schema validation.
//!
//! Validation never panics or returns a bare string: every rejected input is
//! described by a [`ValidationFailure`] tree whose shape follows the schema
//! node that produced it.

mod validation_failure;

pub use validation_failure::{NestedFailures, ValidationFailure};
