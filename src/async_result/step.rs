//! Values a `flat_map` or `filter` callback may hand back.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::{BoxFuture, FutureExt};

use super::fault::{ErrorValue, Fault};
use super::AsyncResult;

/// The next stage of a chain, already settled or still pending.
///
/// Callbacks usually return one of the wrapped types directly and let
/// `Into` pick the variant.
pub enum Step<E, R> {
    /// A result that is already known.
    Immediate(Result<R, E>),
    /// A pending result; panics while polling become failures.
    Deferred(BoxFuture<'static, Result<R, E>>),
    /// Another pipeline, settled with its own error value.
    Chained(AsyncResult<E, R>),
}

impl<E, R> Step<E, R> {
    /// Creates a `Deferred` step from any pending result.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<R, E>> + Send + 'static,
    {
        Step::Deferred(future.boxed())
    }

    /// A `Chained` step settles through its own error value; the other
    /// variants use `error_value` for panics.
    pub(crate) async fn resolve(self, error_value: &ErrorValue<E>) -> Result<R, E> {
        match self {
            Step::Immediate(result) => result,
            Step::Deferred(future) => caught(future, error_value).await,
            Step::Chained(chained) => chained.to_result().await,
        }
    }
}

impl<E, R> From<Result<R, E>> for Step<E, R> {
    fn from(result: Result<R, E>) -> Self {
        Step::Immediate(result)
    }
}

impl<E, R> From<AsyncResult<E, R>> for Step<E, R> {
    fn from(chained: AsyncResult<E, R>) -> Self {
        Step::Chained(chained)
    }
}

impl<E, R> From<BoxFuture<'static, Result<R, E>>> for Step<E, R> {
    fn from(future: BoxFuture<'static, Result<R, E>>) -> Self {
        Step::Deferred(future)
    }
}

/// A filter verdict, already known or still pending.
pub enum Check<E> {
    /// A verdict that is already known.
    Now(bool),
    /// A pending verdict; a panic while polling becomes a failure.
    Later(BoxFuture<'static, bool>),
    /// A verdict from another pipeline; its failure is kept.
    Chained(AsyncResult<E, bool>),
}

impl<E> Check<E> {
    /// Creates a `Later` verdict from a pending `bool`.
    pub fn later<F>(future: F) -> Self
    where
        F: Future<Output = bool> + Send + 'static,
    {
        Check::Later(future.boxed())
    }

    /// A failed `Chained` verdict is returned as its own failure.
    pub(crate) async fn resolve(self, error_value: &ErrorValue<E>) -> Result<bool, E> {
        match self {
            Check::Now(keep) => Ok(keep),
            Check::Later(future) => caught(future.map(Ok), error_value).await,
            Check::Chained(chained) => chained.to_result().await,
        }
    }
}

impl<E> From<bool> for Check<E> {
    fn from(keep: bool) -> Self {
        Check::Now(keep)
    }
}

impl<E> From<AsyncResult<E, bool>> for Check<E> {
    fn from(chained: AsyncResult<E, bool>) -> Self {
        Check::Chained(chained)
    }
}

impl<E> From<BoxFuture<'static, bool>> for Check<E> {
    fn from(future: BoxFuture<'static, bool>) -> Self {
        Check::Later(future)
    }
}

/// Awaits `future`, turning a panic into a failure through `error_value`.
pub(crate) async fn caught<T, E, F>(future: F, error_value: &ErrorValue<E>) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(error_value.convert(Fault::from_panic(payload))),
    }
}

/// Runs `f`, turning a panic into a failure through `error_value`.
pub(crate) fn guarded<T, E>(
    error_value: &ErrorValue<E>,
    f: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    std::panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(error_value.convert(Fault::from_panic(payload))))
}
