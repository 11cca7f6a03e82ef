//! Deferred units of work
//!
//! `IO<A>` wraps a zero-argument producer (synchronous or asynchronous) and
//! runs it only when asked. It is the execution substrate underneath
//! [`EitherIO`](crate::EitherIO): every effect combinator builds a new `IO` by
//! sequencing the previous one with a continuation.
//!
//! # Repeatable, not memoised
//!
//! Each call to [`IO::run`] or [`IO::safe_run`] invokes the producer again.
//! Nothing is cached, so a non-idempotent producer can yield a different
//! value on every run.
//!
//! ```
//! use either_io::IO;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let counter = Arc::new(AtomicUsize::new(0));
//! let ticks = Arc::clone(&counter);
//! let io = IO::from_fn(move || ticks.fetch_add(1, Ordering::SeqCst) + 1);
//!
//! assert_eq!(counter.load(Ordering::SeqCst), 0); // nothing ran yet
//! assert_eq!(io.run().await, 1);
//! assert_eq!(io.run().await, 2);
//! # });
//! ```
//!
//! # Two execution modes
//!
//! - [`IO::run`] lets a panic inside the producer unwind to the caller.
//! - [`IO::safe_run`] catches it and reports it as a [`Fault`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture};
use futures::FutureExt;

use crate::fault::{capture, capture_future, Fault};

type Thunk<A> = Arc<dyn Fn() -> BoxFuture<'static, A> + Send + Sync>;

/// A lazily evaluated, repeatable unit of work producing an `A`.
///
/// Cloning an `IO` is cheap: clones share the same immutable producer.
pub struct IO<A> {
    thunk: Thunk<A>,
}

impl<A> Clone for IO<A> {
    fn clone(&self) -> Self {
        IO {
            thunk: Arc::clone(&self.thunk),
        }
    }
}

impl<A> fmt::Debug for IO<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IO").field("thunk", &"<function>").finish()
    }
}

impl<A> IO<A>
where
    A: Send + 'static,
{
    /// Create from an asynchronous producer.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::IO;
    ///
    /// # tokio_test::block_on(async {
    /// let io = IO::new(|| async { 6 * 7 });
    /// assert_eq!(io.run().await, 42);
    /// # });
    /// ```
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        IO {
            thunk: Arc::new(move || producer().boxed()),
        }
    }

    /// Create from a synchronous producer.
    pub fn from_fn<F>(producer: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        IO::new(move || future::ready(producer()))
    }

    /// Create an `IO` that yields a clone of `value` on every run.
    pub fn pure(value: A) -> Self
    where
        A: Clone + Sync,
    {
        IO::new(move || future::ready(value.clone()))
    }

    /// Sequence with a continuation that returns a future.
    ///
    /// The continuation runs once per run of the resulting `IO`, after this
    /// `IO` has produced its value.
    pub fn then<B, F, Fut>(self, f: F) -> IO<B>
    where
        B: Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = B> + Send + 'static,
    {
        let f = Arc::new(f);
        IO::new(move || {
            let first = (self.thunk)();
            let f = Arc::clone(&f);
            async move {
                let value = first.await;
                f(value).await
            }
        })
    }

    /// Sequence with a continuation that returns the next `IO`.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::IO;
    ///
    /// # tokio_test::block_on(async {
    /// let io = IO::pure(20).and_then(|x| IO::new(move || async move { x + 22 }));
    /// assert_eq!(io.run().await, 42);
    /// # });
    /// ```
    pub fn and_then<B, F>(self, f: F) -> IO<B>
    where
        B: Send + 'static,
        F: Fn(A) -> IO<B> + Send + Sync + 'static,
    {
        self.then(move |value| {
            let next = f(value);
            async move { next.run().await }
        })
    }

    /// Transform the produced value.
    pub fn map<B, F>(self, f: F) -> IO<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.then(move |value| future::ready(f(value)))
    }

    /// Run to completion. A panic in the producer unwinds into the caller.
    pub async fn run(&self) -> A {
        (self.thunk)().await
    }

    /// Run to completion, reporting a panic in the producer as a [`Fault`].
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::IO;
    ///
    /// # tokio_test::block_on(async {
    /// let io = IO::<i32>::from_fn(|| panic!("disk on fire"));
    /// let fault = io.safe_run().await.unwrap_err();
    /// assert!(fault.is_panic());
    /// # });
    /// ```
    pub async fn safe_run(&self) -> Result<A, Fault> {
        let pending = capture(|| (self.thunk)())?;
        capture_future(pending).await
    }
}
