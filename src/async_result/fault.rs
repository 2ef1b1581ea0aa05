//! What can go wrong inside a pipeline stage, and how it reaches the
//! failure channel.

use std::any::Any;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// An unexpected failure raised by a stage rather than returned as `E`.
///
/// Faults never escape an [`AsyncResult`](super::AsyncResult): each one is
/// handed to the active [`ErrorValue`] and becomes an ordinary failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// A callback or awaited future panicked.
    #[error("panicked: {0}")]
    Panicked(String),

    /// A fallible callback or pending value returned an error.
    #[error("rejected: {0}")]
    Rejected(String),
}

impl Fault {
    /// The payload text, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Fault::Panicked(message) | Fault::Rejected(message) => message,
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Fault::Panicked(message)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::Rejected(message)
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::Rejected(message.to_string())
    }
}

impl From<std::io::Error> for Fault {
    fn from(error: std::io::Error) -> Self {
        Fault::Rejected(error.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Fault {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Fault::Rejected(error.to_string())
    }
}

impl From<Infallible> for Fault {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Converts a [`Fault`] into the failure type `E`.
///
/// Either a fixed value ([`ErrorValue::literal`]) or a function of the fault
/// ([`ErrorValue::from_fn`]). Cloning is cheap; stages share the function.
///
/// The conversion itself runs outside any panic boundary: a function passed
/// to [`ErrorValue::from_fn`] must not panic, or the panic propagates out of
/// the pipeline's exit.
pub struct ErrorValue<E>(Arc<dyn Fn(Fault) -> E + Send + Sync>);

impl<E> ErrorValue<E> {
    /// Every fault becomes a clone of `value`.
    pub fn literal(value: E) -> Self
    where
        E: Clone + Send + Sync + 'static,
    {
        Self(Arc::new(move |_| value.clone()))
    }

    /// Every fault is passed to `convert`, which must not panic.
    ///
    /// ```rust
    /// use sortie::{ErrorValue, Fault};
    ///
    /// let ev = ErrorValue::from_fn(|fault: Fault| format!("mapped:{}", fault.message()));
    /// assert_eq!(ev.convert(Fault::Panicked("boom".into())), "mapped:boom");
    /// ```
    pub fn from_fn(convert: impl Fn(Fault) -> E + Send + Sync + 'static) -> Self {
        Self(Arc::new(convert))
    }

    /// Returns the failure value for `fault`.
    pub fn convert(&self, fault: Fault) -> E {
        tracing::debug!(%fault, "converting fault into failure value");
        (self.0)(fault)
    }
}

impl<E> Clone for ErrorValue<E> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<E> fmt::Debug for ErrorValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorValue(..)")
    }
}

/// A settled failure surfaced as an ordinary Rust error by
/// [`AsyncResult::into_value_or_fail`](super::AsyncResult::into_value_or_fail).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("async result settled as failure: {0:?}")]
pub struct Rejected<E>(pub E);

impl<E> Rejected<E> {
    /// Returns the settled failure value.
    pub fn into_inner(self) -> E {
        self.0
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Fault>();
    assert_send_sync::<ErrorValue<String>>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payloads() {
        let static_str = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(Fault::from_panic(static_str), Fault::Panicked("boom".into()));

        let formatted = std::panic::catch_unwind(|| panic!("code {}", 7)).unwrap_err();
        assert_eq!(Fault::from_panic(formatted).message(), "code 7");

        let opaque = std::panic::catch_unwind(|| std::panic::panic_any(42_u8)).unwrap_err();
        assert_eq!(Fault::from_panic(opaque).message(), "unknown panic");
    }

    #[test]
    fn test_display_and_message() {
        let fault = Fault::from("socket closed");
        assert_eq!(fault.to_string(), "rejected: socket closed");
        assert_eq!(fault.message(), "socket closed");
    }

    #[test]
    fn test_literal_ignores_fault() {
        let ev = ErrorValue::literal(500_u16);
        assert_eq!(ev.convert(Fault::Rejected("x".into())), 500);
        assert_eq!(ev.clone().convert(Fault::Panicked("y".into())), 500);
    }

    #[test]
    #[should_panic(expected = "converter failed")]
    fn test_panicking_converter_is_not_caught() {
        let ev: ErrorValue<String> = ErrorValue::from_fn(|_| panic!("converter failed"));
        ev.convert(Fault::Panicked("boom".into()));
    }

    #[test]
    fn test_rejected_display() {
        let rejected = Rejected("not found");
        assert_eq!(rejected.to_string(), "async result settled as failure: \"not found\"");
        assert_eq!(rejected.into_inner(), "not found");
    }
}
