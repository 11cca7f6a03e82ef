//! Lazy async effects with a typed failure channel
//!
//! `EitherIO<E, T>` is a deferred computation that, when run, produces an
//! [`Either<E, T>`](crate::Either): a failure value of type `E` or a success
//! value of type `T`. It pairs an [`IO`](crate::IO) of that outcome with a
//! [`FailureFn<E>`], the default failure constructor used to turn any
//! unexpected [`Fault`] (a panic, or an error from a fallible producer) into
//! a typed failure.
//!
//! # Core Concepts
//!
//! - **Lazy**: constructing, mapping or combining never runs anything. Work
//!   happens only in [`EitherIO::run`] or [`EitherIO::safe_run`].
//! - **Short-circuit**: once a step yields `Left`, later success-path steps
//!   are skipped.
//! - **Local capture**: every combinator that calls user code catches faults
//!   right there and converts them with the active failure constructor.
//! - **Repeatable**: each terminal call re-executes the whole chain.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use either_io::{Either, EitherIO, FailureFn, Fault};
//!
//! # tokio_test::block_on(async {
//! let failure = FailureFn::new(|fault: Fault| fault.to_string());
//!
//! let effect = EitherIO::from_fn(failure.clone(), || 42).map(|x| x + 1);
//! assert_eq!(effect.run().await, Ok(43));
//!
//! let effect = EitherIO::<String, i32>::raise(|| "bad".to_string());
//! assert_eq!(effect.safe_run().await, Either::left("bad".to_string()));
//! # });
//! ```
//!
//! ## Faults become typed failures
//!
//! ```
//! use either_io::{Either, EitherIO, FailureFn, Fault};
//!
//! # tokio_test::block_on(async {
//! let failure = FailureFn::new(|fault: Fault| format!("unexpected: {}", fault));
//!
//! let effect = EitherIO::<String, i32>::from_fn(failure, || panic!("boom"));
//! assert_eq!(
//!     effect.safe_run().await,
//!     Either::left("unexpected: panicked: boom".to_string())
//! );
//! # });
//! ```
//!
//! ## Chaining
//!
//! ```
//! use either_io::{EitherIO, FailureFn, Fault};
//!
//! # tokio_test::block_on(async {
//! let failure = FailureFn::new(|fault: Fault| fault.to_string());
//!
//! let effect = EitherIO::of(failure, 1)
//!     .flat_map(|v, _| EitherIO::<String, i32>::raise(move || format!("rejected {}", v)))
//!     .flat_map(|v, failure| EitherIO::of(failure.clone(), v * 100));
//!
//! assert_eq!(effect.run().await, Err("rejected 1".to_string()));
//! # });
//! ```

mod failure;
mod failure_fn;
#[cfg(feature = "tracing")]
mod instrument;
mod success;

pub use failure_fn::FailureFn;

use std::fmt;
use std::future::{self, Future};
use std::sync::Arc;

use futures::FutureExt;

use crate::either::Either;
use crate::fault::{capture, capture_future, Fault};
use crate::io::IO;

/// A lazy, repeatable computation yielding `Either<E, T>`.
///
/// # Type Parameters
///
/// * `E` - The failure type
/// * `T` - The success type
///
/// Cloning an effect is cheap and shares the underlying deferred work; the
/// clone runs the same chain again when executed.
pub struct EitherIO<E, T> {
    failure: FailureFn<E>,
    io: IO<Either<E, T>>,
}

impl<E, T> Clone for EitherIO<E, T> {
    fn clone(&self) -> Self {
        EitherIO {
            failure: self.failure.clone(),
            io: self.io.clone(),
        }
    }
}

impl<E, T> fmt::Debug for EitherIO<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EitherIO")
            .field("failure", &self.failure)
            .field("io", &self.io)
            .finish()
    }
}

/// What a continuation settled on: a final outcome, or another effect whose
/// deferred work is adopted.
enum Step<E, T> {
    Settled(Either<E, T>),
    Continue(EitherIO<E, T>),
}

impl<E, T> Step<E, T>
where
    E: Send + 'static,
    T: Send + 'static,
{
    async fn resolve(self) -> Either<E, T> {
        match self {
            Step::Settled(outcome) => outcome,
            Step::Continue(next) => next.io.run().await,
        }
    }
}

async fn complete<Fut>(pending: Result<Fut, Fault>) -> Result<Fut::Output, Fault>
where
    Fut: Future,
{
    match pending {
        Ok(future) => capture_future(future).await,
        Err(fault) => Err(fault),
    }
}

impl<E, T> EitherIO<E, T>
where
    E: Send + 'static,
    T: Send + 'static,
{
    /// Build the deferred outcome of a producer, converting faults raised
    /// while starting or driving it through `failure`.
    fn guarded<F, Fut>(failure: FailureFn<E>, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Either<E, T>, Fault>> + Send + 'static,
    {
        let on_fault = failure.clone();
        let io = IO::new(move || {
            let on_fault = on_fault.clone();
            let pending = capture(&producer);
            async move {
                match complete(pending).await.and_then(|settled| settled) {
                    Ok(outcome) => outcome,
                    Err(fault) => Either::Left(on_fault.call(fault)),
                }
            }
        });
        EitherIO { failure, io }
    }

    /// Sequence a continuation over the settled outcome of this effect.
    ///
    /// Faults raised by the continuation, synchronously or while its future
    /// is polled, become `Left` through `failure`, which is also the default
    /// failure constructor of the result.
    fn chain<E2, U, F, Fut>(self, failure: FailureFn<E2>, continuation: F) -> EitherIO<E2, U>
    where
        E2: Send + 'static,
        U: Send + 'static,
        F: Fn(Either<E, T>, &FailureFn<E2>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Step<E2, U>> + Send + 'static,
    {
        let on_fault = failure.clone();
        let io = self.io.then(move |outcome| {
            let on_fault = on_fault.clone();
            let pending = capture(|| continuation(outcome, &on_fault));
            async move {
                match complete(pending).await {
                    Ok(step) => step.resolve().await,
                    Err(fault) => Either::Left(on_fault.call(fault)),
                }
            }
        });
        EitherIO { failure, io }
    }

    // ========== Construction ==========

    /// An effect that always succeeds with `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{Either, EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let effect = EitherIO::of(FailureFn::new(|f: Fault| f.to_string()), 42);
    /// assert_eq!(effect.safe_run().await, Either::right(42));
    /// # });
    /// ```
    #[doc(alias = "pure")]
    pub fn of(failure: FailureFn<E>, value: T) -> Self
    where
        T: Clone + Sync,
    {
        EitherIO {
            failure,
            io: IO::from_fn(move || Either::Right(value.clone())),
        }
    }

    /// Wrap a synchronous producer of a success value.
    ///
    /// A panic in `producer` becomes `Left(failure(fault))`.
    pub fn from_fn<F>(failure: FailureFn<E>, producer: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::guarded(failure, move || {
            future::ready(Ok(Either::Right(producer())))
        })
    }

    /// Wrap an asynchronous producer of a success value.
    ///
    /// A panic while creating or polling the future becomes
    /// `Left(failure(fault))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let effect = EitherIO::<String, _>::from_async(
    ///     FailureFn::new(|f: Fault| f.to_string()),
    ///     || async { "payload".len() },
    /// );
    /// assert_eq!(effect.run().await, Ok(7));
    /// # });
    /// ```
    pub fn from_async<F, Fut>(failure: FailureFn<E>, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::guarded(failure, move || {
            producer().map(|value| Ok(Either::Right(value)))
        })
    }

    /// Wrap an asynchronous, fallible producer.
    ///
    /// `Err(x)` is treated as a rejection: `x` is converted into a [`Fault`]
    /// and handed to `failure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{Either, EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let failure = FailureFn::new(|f: Fault| format!("parse failed: {}", f));
    /// let effect = EitherIO::attempt(failure, || async { "12x".parse::<i32>() });
    ///
    /// assert_eq!(
    ///     effect.safe_run().await,
    ///     Either::left("parse failed: invalid digit found in string".to_string())
    /// );
    /// # });
    /// ```
    pub fn attempt<F, Fut, X>(failure: FailureFn<E>, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, X>> + Send + 'static,
        X: Into<Fault>,
    {
        Self::guarded(failure, move || {
            producer().map(|result| result.map(Either::Right).map_err(Into::into))
        })
    }

    /// Wrap an asynchronous producer that already yields an outcome.
    ///
    /// The outcome passes through unchanged; only faults are converted.
    pub fn from_either<F, Fut>(failure: FailureFn<E>, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Either<E, T>> + Send + 'static,
    {
        Self::guarded(failure, move || producer().map(Ok))
    }

    /// Wrap a synchronous producer that already yields an outcome.
    pub fn from_either_fn<F>(failure: FailureFn<E>, producer: F) -> Self
    where
        F: Fn() -> Either<E, T> + Send + Sync + 'static,
    {
        Self::guarded(failure, move || future::ready(Ok(producer())))
    }

    /// An effect that always fails with `failure_fn()`.
    ///
    /// `failure_fn` also becomes the default failure constructor, so later
    /// faults in the same chain resolve to the same kind of value unless a
    /// failure-path combinator replaces it.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::EitherIO;
    ///
    /// # tokio_test::block_on(async {
    /// let effect = EitherIO::<_, i32>::raise(|| "out of stock");
    /// assert_eq!(effect.run().await, Err("out of stock"));
    /// # });
    /// ```
    pub fn raise<G>(failure_fn: G) -> Self
    where
        G: Fn() -> E + Send + Sync + 'static,
    {
        let raise = Arc::new(failure_fn);
        let adopted = Arc::clone(&raise);
        EitherIO {
            failure: FailureFn::from_raise(move || adopted()),
            io: IO::from_fn(move || Either::Left(raise())),
        }
    }

    // ========== Terminal execution ==========

    /// Run the chain and return the success value, or the failure value as
    /// `Err`.
    ///
    /// `Err` holds exactly the failure produced by the chain. A fault inside
    /// the deferred machinery itself (one no combinator captured) resumes
    /// unwinding in the caller.
    pub async fn run(&self) -> Result<T, E> {
        self.io.run().await.into_result()
    }

    /// Run the chain and return its outcome without panicking.
    ///
    /// A fault inside the deferred machinery itself is surfaced as
    /// `Left(failure(fault))` using this effect's default failure
    /// constructor.
    pub async fn safe_run(&self) -> Either<E, T> {
        match self.io.safe_run().await {
            Ok(outcome) => outcome,
            Err(fault) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(fault = %fault, "deferred execution faulted; surfacing as failure");
                Either::Left(self.failure.call(fault))
            }
        }
    }

    /// [`run`](Self::run) on the current thread.
    pub fn run_blocking(&self) -> Result<T, E> {
        futures::executor::block_on(self.run())
    }

    /// [`safe_run`](Self::safe_run) on the current thread.
    pub fn safe_run_blocking(&self) -> Either<E, T> {
        futures::executor::block_on(self.safe_run())
    }

    /// The default failure constructor of this effect.
    pub fn failure_fn(&self) -> &FailureFn<E> {
        &self.failure
    }
}
