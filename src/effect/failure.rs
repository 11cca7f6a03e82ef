//! Failure-path sequencing: `flat_map_left`, `map_left`, `catch`, `tap_left`.

use std::future;
use std::sync::Arc;

use super::{EitherIO, FailureFn, Step};
use crate::either::Either;
use crate::fault::capture;
use crate::io::IO;

impl<E, T> EitherIO<E, T>
where
    E: Send + 'static,
    T: Send + 'static,
{
    /// Chain an effect on the failure value, possibly changing the failure
    /// type.
    ///
    /// A success passes through untouched. On `Left(e)`, `f(e)` is called and
    /// the returned effect is adopted. Since the failure type changes, a
    /// panic in `f` is converted by `next_failure`, which also becomes the
    /// default failure constructor of the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{EitherIO, FailureFn, Fault};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum AppError {
    ///     NotFound(String),
    ///     Internal(String),
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// let app_failure = FailureFn::new(|f: Fault| AppError::Internal(f.to_string()));
    ///
    /// let effect = EitherIO::<&str, i32>::raise(|| "user 7")
    ///     .flat_map_left(app_failure, |missing| {
    ///         EitherIO::raise(move || AppError::NotFound(missing.to_string()))
    ///     });
    ///
    /// assert_eq!(effect.run().await, Err(AppError::NotFound("user 7".to_string())));
    /// # });
    /// ```
    pub fn flat_map_left<E2, F>(self, next_failure: FailureFn<E2>, f: F) -> EitherIO<E2, T>
    where
        E2: Send + 'static,
        F: Fn(E) -> EitherIO<E2, T> + Send + Sync + 'static,
    {
        self.chain(next_failure, move |outcome, _| {
            let step = match outcome {
                Either::Right(value) => Step::Settled(Either::Right(value)),
                Either::Left(error) => Step::Continue(f(error)),
            };
            future::ready(step)
        })
    }

    /// Transform the failure value into a new failure type.
    ///
    /// A panic in `f` is converted by `next_failure`, which becomes the
    /// default failure constructor of the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let effect = EitherIO::<i32, ()>::raise(|| 404)
    ///     .map_left(FailureFn::new(|f: Fault| f.to_string()), |code| format!("HTTP {}", code));
    /// assert_eq!(effect.run().await, Err("HTTP 404".to_string()));
    /// # });
    /// ```
    pub fn map_left<E2, F>(self, next_failure: FailureFn<E2>, f: F) -> EitherIO<E2, T>
    where
        E2: Send + 'static,
        F: Fn(E) -> E2 + Send + Sync + 'static,
    {
        self.chain(next_failure, move |outcome, _| {
            future::ready(Step::Settled(outcome.map_left(&f)))
        })
    }

    /// Recover from a failure with a replacement outcome of the same types.
    ///
    /// The receiver is driven with [`safe_run`](Self::safe_run), so a fault
    /// in its own deferred work reaches `f` as a `Left` too. On `Left(e)` the
    /// result is exactly `f(e)`; a success is never passed to `f`. A panic in
    /// `f` becomes `Left` through this effect's default failure constructor,
    /// which is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{Either, EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let effect = EitherIO::<String, i32>::raise(|| "cache miss".to_string())
    ///     .catch(|error| {
    ///         if error == "cache miss" {
    ///             Either::right(0)
    ///         } else {
    ///             Either::left(error)
    ///         }
    ///     });
    /// assert_eq!(effect.run().await, Ok(0));
    /// # });
    /// ```
    pub fn catch<F>(self, f: F) -> Self
    where
        F: Fn(E) -> Either<E, T> + Send + Sync + 'static,
    {
        let failure = self.failure.clone();
        let f = Arc::new(f);
        let io = IO::new(move || {
            let receiver = self.clone();
            let f = Arc::clone(&f);
            async move {
                let outcome = receiver.safe_run().await;
                match capture(|| outcome.or_else(|error| f(error))) {
                    Ok(settled) => settled,
                    Err(fault) => Either::Left(receiver.failure.call(fault)),
                }
            }
        });
        EitherIO { failure, io }
    }

    /// Observe the failure value without affecting the outcome.
    ///
    /// Mirror of [`tap`](Self::tap): `f` runs once per run when the effect
    /// fails, and a panic in `f` is ignored.
    pub fn tap_left<F>(self, f: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let failure = self.failure.clone();
        self.chain(failure, move |outcome, _| {
            if let Either::Left(error) = &outcome {
                if let Err(_fault) = capture(|| f(error)) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(fault = %_fault, "tap_left callback faulted; ignored");
                }
            }
            future::ready(Step::Settled(outcome))
        })
    }
}
