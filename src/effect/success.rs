//! Success-path sequencing: `flat_map`, `map`, `tap`, `filter`, `zip`.
//!
//! All of these short-circuit on `Left` and keep the receiver's default
//! failure constructor.

use std::future::{self, Future};
use std::sync::Arc;

use super::{EitherIO, FailureFn, Step};
use crate::either::Either;
use crate::fault::{capture, Fault};

impl<E, T> EitherIO<E, T>
where
    E: Send + 'static,
    T: Send + 'static,
{
    /// Chain a dependent effect.
    ///
    /// On `Right(v)`, calls `f(v, failure)` and adopts the returned effect.
    /// On `Left`, `f` is never called and the failure propagates. A panic in
    /// `f` becomes `Left` through this effect's default failure constructor,
    /// which `f` also receives so it can build effects of the same kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let failure = FailureFn::new(|f: Fault| f.to_string());
    /// let effect = EitherIO::of(failure, 5)
    ///     .flat_map(|x, failure| EitherIO::of(failure.clone(), x * 2));
    /// assert_eq!(effect.run().await, Ok(10));
    /// # });
    /// ```
    pub fn flat_map<U, F>(self, f: F) -> EitherIO<E, U>
    where
        U: Send + 'static,
        F: Fn(T, &FailureFn<E>) -> EitherIO<E, U> + Send + Sync + 'static,
    {
        self.flat_map_async(move |value, failure| future::ready(f(value, failure)))
    }

    /// Like [`flat_map`](Self::flat_map), for continuations that produce the
    /// next effect asynchronously.
    ///
    /// Panics while calling `f` or while awaiting its future are both
    /// captured.
    pub fn flat_map_async<U, F, Fut>(self, f: F) -> EitherIO<E, U>
    where
        U: Send + 'static,
        F: Fn(T, &FailureFn<E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = EitherIO<E, U>> + Send + 'static,
    {
        let failure = self.failure.clone();
        self.chain(failure, move |outcome, failure| {
            let next = outcome.map(|value| f(value, failure));
            async move {
                match next {
                    Either::Left(error) => Step::Settled(Either::Left(error)),
                    Either::Right(pending) => Step::Continue(pending.await),
                }
            }
        })
    }

    /// Transform the success value.
    ///
    /// A panic in `f` becomes `Left` through the default failure
    /// constructor.
    pub fn map<U, F>(self, f: F) -> EitherIO<E, U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let failure = self.failure.clone();
        self.chain(failure, move |outcome, _| {
            future::ready(Step::Settled(outcome.map(&f)))
        })
    }

    /// Transform the success value with a fallible function.
    ///
    /// `Err(x)` is converted into a [`Fault`] and then into a failure by the
    /// default failure constructor.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{Either, EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let failure = FailureFn::new(|f: Fault| format!("bad config: {}", f));
    /// let effect = EitherIO::of(failure, "80".to_string())
    ///     .try_map(|raw| raw.parse::<u16>());
    /// assert_eq!(effect.safe_run().await, Either::right(80));
    /// # });
    /// ```
    pub fn try_map<U, F, X>(self, f: F) -> EitherIO<E, U>
    where
        U: Send + 'static,
        F: Fn(T) -> Result<U, X> + Send + Sync + 'static,
        X: Into<Fault>,
    {
        let failure = self.failure.clone();
        self.chain(failure, move |outcome, failure| {
            let settled = outcome.and_then(|value| match f(value) {
                Ok(mapped) => Either::Right(mapped),
                Err(error) => Either::Left(failure.call(error.into())),
            });
            future::ready(Step::Settled(settled))
        })
    }

    /// Observe the success value without affecting the outcome.
    ///
    /// `f` runs exactly once per run when the effect succeeds and never when
    /// it fails. A panic in `f` is ignored; the original value always
    /// passes through.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let effect = EitherIO::of(FailureFn::new(|f: Fault| f.to_string()), 42)
    ///     .tap(|_| panic!("metrics backend down"));
    /// assert_eq!(effect.run().await, Ok(42));
    /// # });
    /// ```
    pub fn tap<F>(self, f: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let failure = self.failure.clone();
        self.chain(failure, move |outcome, _| {
            if let Either::Right(value) = &outcome {
                if let Err(_fault) = capture(|| f(value)) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(fault = %_fault, "tap callback faulted; ignored");
                }
            }
            future::ready(Step::Settled(outcome))
        })
    }

    /// Keep the success value only if `predicate` holds.
    ///
    /// If the predicate returns `false` or panics, the result is
    /// `Left(failure_fn())`. The panic itself is not surfaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{Either, EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let failure = FailureFn::new(|f: Fault| f.to_string());
    ///
    /// let adult = EitherIO::of(failure.clone(), 25)
    ///     .filter(|| "too young".to_string(), |age| *age >= 18);
    /// assert_eq!(adult.safe_run().await, Either::right(25));
    ///
    /// let minor = EitherIO::of(failure, 15)
    ///     .filter(|| "too young".to_string(), |age| *age >= 18);
    /// assert_eq!(minor.safe_run().await, Either::left("too young".to_string()));
    /// # });
    /// ```
    pub fn filter<G, P>(self, failure_fn: G, predicate: P) -> Self
    where
        G: Fn() -> E + Send + Sync + 'static,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let failure = self.failure.clone();
        self.chain(failure, move |outcome, _| {
            let settled = outcome.and_then(|value| match capture(|| predicate(&value)) {
                Ok(true) => Either::Right(value),
                Ok(false) | Err(_) => Either::Left(failure_fn()),
            });
            future::ready(Step::Settled(settled))
        })
    }

    /// Combine with another effect once this one has succeeded.
    ///
    /// `other` starts only after this effect's value is known (sequential,
    /// not concurrent). A failure on either side is adopted as the result and
    /// `combine` is not called. A panic in `combine` becomes `Left` through
    /// the default failure constructor.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::{EitherIO, FailureFn, Fault};
    ///
    /// # tokio_test::block_on(async {
    /// let failure = FailureFn::new(|f: Fault| f.to_string());
    /// let effect = EitherIO::of(failure.clone(), 2)
    ///     .zip(EitherIO::of(failure, 3), |a, b| a + b);
    /// assert_eq!(effect.run().await, Ok(5));
    /// # });
    /// ```
    pub fn zip<U, V, C>(self, other: EitherIO<E, U>, combine: C) -> EitherIO<E, V>
    where
        U: Send + 'static,
        V: Send + 'static,
        C: Fn(T, U) -> V + Send + Sync + 'static,
    {
        let failure = self.failure.clone();
        let combine = Arc::new(combine);
        self.chain(failure, move |outcome, _| {
            let other = other.clone();
            let combine = Arc::clone(&combine);
            async move {
                let value = match outcome {
                    Either::Left(error) => return Step::Settled(Either::Left(error)),
                    Either::Right(value) => value,
                };
                let settled = other
                    .safe_run()
                    .await
                    .map(|other_value| combine(value, other_value));
                Step::Settled(settled)
            }
        })
    }
}
