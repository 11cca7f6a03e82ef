//! The default failure constructor carried by every effect.

use std::fmt;
use std::sync::Arc;

use crate::fault::Fault;

/// Converts an unexpected [`Fault`] into a typed failure value.
///
/// Every [`EitherIO`](crate::EitherIO) owns one. Success-path combinators
/// pass it along unchanged; failure-path combinators that change the failure
/// type take a replacement. It is an ordinary value, never ambient state.
///
/// # Examples
///
/// ```
/// use either_io::{FailureFn, Fault};
///
/// let failure = FailureFn::new(|fault: Fault| format!("unexpected: {}", fault));
/// assert_eq!(failure.call(Fault::msg("timeout")), "unexpected: timeout");
/// ```
pub struct FailureFn<E> {
    f: Arc<dyn Fn(Fault) -> E + Send + Sync>,
}

impl<E> FailureFn<E> {
    /// Wrap a conversion from faults to failures.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Fault) -> E + Send + Sync + 'static,
    {
        FailureFn { f: Arc::new(f) }
    }

    /// Build a constructor that ignores the fault and always produces
    /// `f()`.
    ///
    /// ```
    /// use either_io::{FailureFn, Fault};
    ///
    /// let failure = FailureFn::from_raise(|| "internal error");
    /// assert_eq!(failure.call(Fault::msg("anything")), "internal error");
    /// ```
    pub fn from_raise<F>(f: F) -> Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        FailureFn::new(move |_| f())
    }

    /// Convert a fault into a failure value.
    pub fn call(&self, fault: Fault) -> E {
        #[cfg(feature = "tracing")]
        tracing::debug!(fault = %fault, "converting fault into failure");
        (self.f)(fault)
    }
}

impl<E> Clone for FailureFn<E> {
    fn clone(&self) -> Self {
        FailureFn {
            f: Arc::clone(&self.f),
        }
    }
}

impl<E> fmt::Debug for FailureFn<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureFn").field("f", &"<function>").finish()
    }
}
