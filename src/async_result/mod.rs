//! Asynchronous success/failure pipelines with a single failure channel.
//!
//! An [`AsyncResult<E, R>`] is a pending computation that settles to
//! `Result<R, E>`, together with a default [`ErrorValue`] that turns any
//! [`Fault`] (a panicking callback, a pending value that returned an error)
//! into an `E`. Every stage consumes the receiver and returns a new
//! `AsyncResult`; stages run strictly in order once the previous one has
//! settled, and a failure skips every later success-side stage.
//!
//! Like any Rust future, nothing runs until the pipeline is driven through
//! one of its two exits: [`to_result`](AsyncResult::to_result), which never
//! fails, or [`into_value_or_fail`](AsyncResult::into_value_or_fail), which
//! surfaces the failure as a [`Rejected`] error for `?` propagation.
//!
//! # Example
//!
//! ```rust
//! use sortie::{AsyncResult, ErrorValue, Fault};
//!
//! # futures::executor::block_on(async {
//! let ev = ErrorValue::from_fn(|fault: Fault| format!("lookup failed: {}", fault.message()));
//!
//! let hours = AsyncResult::right(3, ev)
//!     .map(|shifts| shifts * 4)
//!     .filter(|hours| *hours >= 10, "not enough hours".to_string())
//!     .to_result()
//!     .await;
//!
//! assert_eq!(hours, Ok(12));
//! # });
//! ```

mod fault;
mod step;

use std::fmt;
use std::future::Future;

use futures::future::{self, BoxFuture, FutureExt};

pub use fault::{ErrorValue, Fault, Rejected};
pub use step::{Check, Step};

use step::{caught, guarded};

/// A pending `Result<R, E>` plus the default conversion for faults.
pub struct AsyncResult<E, R> {
    pending: BoxFuture<'static, Result<R, E>>,
    error_value: ErrorValue<E>,
}

impl<E, R> AsyncResult<E, R>
where
    E: Send + 'static,
    R: Send + 'static,
{
    /// An already successful result.
    pub fn right(value: R, error_value: ErrorValue<E>) -> Self {
        Self::from_result(Ok(value), error_value)
    }

    /// An already failed result; `error` doubles as the literal default
    /// error value.
    pub fn left(error: E) -> Self
    where
        E: Clone + Sync,
    {
        let error_value = ErrorValue::literal(error.clone());
        Self::from_result(Err(error), error_value)
    }

    /// Creates a settled result from a plain `Result`.
    pub fn from_result(result: Result<R, E>, error_value: ErrorValue<E>) -> Self {
        Self {
            pending: future::ready(result).boxed(),
            error_value,
        }
    }

    /// Wraps a pending value whose own errors are faults: an `Err(x)` or a
    /// panic becomes `Err(error_value(fault))`.
    pub fn pending<F, X>(future: F, error_value: ErrorValue<E>) -> Self
    where
        F: Future<Output = Result<R, X>> + Send + 'static,
        X: Into<Fault>,
    {
        let ev = error_value.clone();
        let pending = async move {
            caught(future.map(Ok), &ev)
                .await?
                .map_err(|fault| ev.convert(fault.into()))
        }
        .boxed();
        Self {
            pending,
            error_value,
        }
    }

    /// Wraps a pending value that already speaks `E`; only panics are
    /// converted.
    pub fn settle<F>(future: F, error_value: ErrorValue<E>) -> Self
    where
        F: Future<Output = Result<R, E>> + Send + 'static,
    {
        let ev = error_value.clone();
        let pending = async move { caught(future, &ev).await }.boxed();
        Self {
            pending,
            error_value,
        }
    }

    /// Wraps a pending value that cannot fail except by panicking.
    pub fn from_future<F>(future: F, error_value: ErrorValue<E>) -> Self
    where
        F: Future<Output = R> + Send + 'static,
    {
        Self::settle(future.map(Ok), error_value)
    }

    /// Returns the default error value for new stages.
    pub fn error_value(&self) -> &ErrorValue<E> {
        &self.error_value
    }

    /// Replaces the default error value used by stages added afterwards.
    pub fn set_error_value(self, error_value: ErrorValue<E>) -> Self {
        Self {
            pending: self.pending,
            error_value,
        }
    }

    fn then_ok<R2, F, Fut>(self, stage_error_value: ErrorValue<E>, stage: F) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        F: FnOnce(R, ErrorValue<E>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R2, E>> + Send + 'static,
    {
        let AsyncResult {
            pending,
            error_value,
        } = self;
        let pending = async move {
            match pending.await {
                Ok(value) => stage(value, stage_error_value).await,
                Err(error) => Err(error),
            }
        }
        .boxed();
        AsyncResult {
            pending,
            error_value,
        }
    }

    fn then_err<F, Fut>(self, stage_error_value: ErrorValue<E>, stage: F) -> Self
    where
        F: FnOnce(E, ErrorValue<E>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
    {
        let AsyncResult {
            pending,
            error_value,
        } = self;
        let pending = async move {
            match pending.await {
                Ok(value) => Ok(value),
                Err(error) => stage(error, stage_error_value).await,
            }
        }
        .boxed();
        AsyncResult {
            pending,
            error_value,
        }
    }

    /// Transforms the success value. A panic in `f` becomes a failure
    /// through the default error value.
    pub fn map<R2, F>(self, f: F) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        F: FnOnce(R) -> R2 + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.map_with(f, ev)
    }

    /// [`map`](Self::map) with a stage-specific error value.
    pub fn map_with<R2, F>(self, f: F, error_value: ErrorValue<E>) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        F: FnOnce(R) -> R2 + Send + 'static,
    {
        self.then_ok(error_value, move |value, ev| {
            future::ready(guarded(&ev, || Ok(f(value))))
        })
    }

    /// Transforms the success value with a callback that may refuse; its
    /// error is a fault.
    pub fn try_map<R2, X, F>(self, f: F) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        X: Into<Fault>,
        F: FnOnce(R) -> Result<R2, X> + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.try_map_with(f, ev)
    }

    /// [`try_map`](Self::try_map) with a stage-specific error value.
    pub fn try_map_with<R2, X, F>(self, f: F, error_value: ErrorValue<E>) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        X: Into<Fault>,
        F: FnOnce(R) -> Result<R2, X> + Send + 'static,
    {
        self.then_ok(error_value, move |value, ev| {
            future::ready(guarded(&ev, || {
                f(value).map_err(|fault| ev.convert(fault.into()))
            }))
        })
    }

    /// Transforms the success value with a callback returning a pending
    /// value. An `Err` from that value, or a panic on either side of the
    /// await, is a fault.
    pub fn map_async<R2, X, F, Fut>(self, f: F) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        X: Into<Fault>,
        F: FnOnce(R) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R2, X>> + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.map_async_with(f, ev)
    }

    /// [`map_async`](Self::map_async) with a stage-specific error value.
    pub fn map_async_with<R2, X, F, Fut>(
        self,
        f: F,
        error_value: ErrorValue<E>,
    ) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        X: Into<Fault>,
        F: FnOnce(R) -> Fut + Send + 'static,
        Fut: Future<Output = Result<R2, X>> + Send + 'static,
    {
        self.then_ok(error_value, move |value, ev| async move {
            let future = guarded(&ev, || Ok(f(value)))?;
            caught(future.map(Ok), &ev)
                .await?
                .map_err(|fault| ev.convert(fault.into()))
        })
    }

    /// Chains a callback that returns a settled result, a pending result or
    /// another `AsyncResult`.
    ///
    /// ```rust
    /// use sortie::{AsyncResult, ErrorValue, Step};
    ///
    /// # futures::executor::block_on(async {
    /// let ev = ErrorValue::literal("unavailable");
    ///
    /// let immediate = AsyncResult::right(2, ev.clone()).flat_map(|x| Ok(x + 1));
    /// let chained = AsyncResult::right(2, ev.clone())
    ///     .flat_map(move |x| AsyncResult::right(x * 10, ev));
    /// let deferred = AsyncResult::right(2, ErrorValue::literal("unavailable"))
    ///     .flat_map(|_| Step::deferred(async move { Err::<i32, _>("closed") }));
    ///
    /// assert_eq!(immediate.to_result().await, Ok(3));
    /// assert_eq!(chained.to_result().await, Ok(20));
    /// assert_eq!(deferred.to_result().await, Err("closed"));
    /// # });
    /// ```
    pub fn flat_map<R2, S, F>(self, f: F) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        S: Into<Step<E, R2>>,
        F: FnOnce(R) -> S + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.flat_map_with(f, ev)
    }

    /// [`flat_map`](Self::flat_map) with a stage-specific error value.
    pub fn flat_map_with<R2, S, F>(self, f: F, error_value: ErrorValue<E>) -> AsyncResult<E, R2>
    where
        R2: Send + 'static,
        S: Into<Step<E, R2>>,
        F: FnOnce(R) -> S + Send + 'static,
    {
        self.then_ok(error_value, move |value, ev| async move {
            let step: Step<E, R2> = guarded(&ev, || Ok(f(value).into()))?;
            step.resolve(&ev).await
        })
    }

    /// Transforms the failure value.
    pub fn left_map<F>(self, f: F) -> Self
    where
        F: FnOnce(E) -> E + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.left_map_with(f, ev)
    }

    /// [`left_map`](Self::left_map) with a stage-specific error value.
    pub fn left_map_with<F>(self, f: F, error_value: ErrorValue<E>) -> Self
    where
        F: FnOnce(E) -> E + Send + 'static,
    {
        self.then_err(error_value, move |error, ev| {
            future::ready(guarded(&ev, || Err(f(error))))
        })
    }

    /// Transforms the failure into another type; `error_value` becomes the
    /// default of the returned pipeline.
    pub fn left_map_to<E2, F>(self, f: F, error_value: ErrorValue<E2>) -> AsyncResult<E2, R>
    where
        E2: Send + 'static,
        F: FnOnce(E) -> E2 + Send + 'static,
    {
        let stage_ev = error_value.clone();
        let pending = self.pending;
        let pending = async move {
            match pending.await {
                Ok(value) => Ok(value),
                Err(error) => guarded(&stage_ev, || Err(f(error))),
            }
        }
        .boxed();
        AsyncResult {
            pending,
            error_value,
        }
    }

    /// Recovers from a failure by chaining another step.
    pub fn left_flat_map<S, F>(self, f: F) -> Self
    where
        S: Into<Step<E, R>>,
        F: FnOnce(E) -> S + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.left_flat_map_with(f, ev)
    }

    /// [`left_flat_map`](Self::left_flat_map) with a stage-specific error value.
    pub fn left_flat_map_with<S, F>(self, f: F, error_value: ErrorValue<E>) -> Self
    where
        S: Into<Step<E, R>>,
        F: FnOnce(E) -> S + Send + 'static,
    {
        self.then_err(error_value, move |error, ev| async move {
            let step: Step<E, R> = guarded(&ev, || Ok(f(error).into()))?;
            step.resolve(&ev).await
        })
    }

    /// Demotes a success to `Err(fail_value)` when `predicate` says no.
    ///
    /// The predicate may answer with a `bool`, a pending `bool`
    /// ([`Check::later`]) or an `AsyncResult<E, bool>` whose failure is
    /// propagated as is.
    pub fn filter<C, P>(self, predicate: P, fail_value: E) -> Self
    where
        C: Into<Check<E>>,
        P: FnOnce(&R) -> C + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.filter_with(predicate, fail_value, ev)
    }

    /// [`filter`](Self::filter) with a stage-specific error value.
    pub fn filter_with<C, P>(self, predicate: P, fail_value: E, error_value: ErrorValue<E>) -> Self
    where
        C: Into<Check<E>>,
        P: FnOnce(&R) -> C + Send + 'static,
    {
        self.then_ok(error_value, move |value, ev| async move {
            let check: Check<E> = guarded(&ev, || Ok(predicate(&value).into()))?;
            if check.resolve(&ev).await? {
                Ok(value)
            } else {
                Err(fail_value)
            }
        })
    }

    /// Observes the success value.
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&R) + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.then_ok(ev, move |value, ev| {
            let observed = guarded(&ev, || {
                f(&value);
                Ok(())
            });
            future::ready(observed.map(|()| value))
        })
    }

    /// Observes the failure value.
    pub fn left_tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + Send + 'static,
    {
        let ev = self.error_value.clone();
        self.then_err(ev, move |error, ev| {
            let observed = guarded(&ev, || {
                f(&error);
                Ok(())
            });
            future::ready(match observed {
                Ok(()) => Err(error),
                Err(converted) => Err(converted),
            })
        })
    }

    /// Calls the contained function with `arg`.
    ///
    /// ```rust
    /// use sortie::{AsyncResult, ErrorValue};
    ///
    /// # futures::executor::block_on(async {
    /// let greet = |name: &'static str| format!("hello {}", name);
    /// let applied = AsyncResult::right(greet, ErrorValue::literal(()))
    ///     .apply("crew")
    ///     .to_result()
    ///     .await;
    /// assert_eq!(applied, Ok("hello crew".to_string()));
    /// # });
    /// ```
    pub fn apply<A, T>(self, arg: A) -> AsyncResult<E, T>
    where
        R: FnOnce(A) -> T,
        A: Send + 'static,
        T: Send + 'static,
    {
        self.map(move |f| f(arg))
    }

    /// Calls the contained function with `arg` and chains its step.
    pub fn flat_apply<A, S, T>(self, arg: A) -> AsyncResult<E, T>
    where
        R: FnOnce(A) -> S,
        A: Send + 'static,
        S: Into<Step<E, T>>,
        T: Send + 'static,
    {
        self.flat_map(move |f| f(arg))
    }

    /// Runs both pipelines concurrently and pairs their values; the first
    /// failure wins when both fail.
    pub fn zip<R2>(self, other: AsyncResult<E, R2>) -> AsyncResult<E, (R, R2)>
    where
        R2: Send + 'static,
    {
        let AsyncResult {
            pending,
            error_value,
        } = self;
        let pending = async move {
            let (left, right) = futures::join!(pending, other.pending);
            Ok::<_, E>((left?, right?))
        }
        .boxed();
        AsyncResult {
            pending,
            error_value,
        }
    }

    /// Drives every member concurrently and waits for all of them.
    ///
    /// Succeeds with the values in input order iff every member succeeded;
    /// otherwise fails with the failure of the earliest failed member in
    /// input order.
    pub fn all<I>(members: I, error_value: ErrorValue<E>) -> AsyncResult<E, Vec<R>>
    where
        I: IntoIterator<Item = AsyncResult<E, R>>,
    {
        let pending: Vec<_> = members.into_iter().map(|member| member.pending).collect();
        let joined = async move {
            future::join_all(pending)
                .await
                .into_iter()
                .collect::<Result<Vec<R>, E>>()
        }
        .boxed();
        AsyncResult {
            pending: joined,
            error_value,
        }
    }

}

impl<E, R> AsyncResult<E, R> {
    /// Settles the pipeline. Never fails: the outcome is the returned
    /// `Result`, provided every [`ErrorValue`] converter returns normally.
    pub async fn to_result(self) -> Result<R, E> {
        self.pending.await
    }

    /// Settles the pipeline and returns the success value, surfacing a
    /// failure as a [`Rejected`] error.
    pub async fn into_value_or_fail(self) -> Result<R, Rejected<E>> {
        self.pending.await.map_err(Rejected)
    }
}

impl<E, R> fmt::Debug for AsyncResult<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncResult")
            .field("error_value", &self.error_value)
            .finish_non_exhaustive()
    }
}
