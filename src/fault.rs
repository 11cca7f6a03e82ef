//! Unexpected faults raised by user code
//!
//! A [`Fault`] is anything that escapes a callback without going through the
//! typed failure channel: a panic, or an error returned by a fallible
//! producer. Effects never let a fault travel further than the combinator
//! that caught it; it is handed to the active
//! [`FailureFn`](crate::effect::FailureFn) and becomes a typed failure.
//!
//! # Examples
//!
//! ```
//! use either_io::Fault;
//!
//! let fault = Fault::msg("connection reset");
//! assert_eq!(fault.to_string(), "connection reset");
//! assert!(!fault.is_panic());
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::FutureExt;

/// An unexpected fault captured at a combinator boundary.
///
/// `Fault` converts from any `std::error::Error + Send + Sync + 'static`, which
/// is why it does not implement `std::error::Error` itself.
#[derive(Debug)]
pub enum Fault {
    /// User code panicked. Holds the panic message.
    Panic(String),
    /// A fallible producer returned an error.
    Error(Box<dyn StdError + Send + Sync + 'static>),
}

impl Fault {
    /// Create a fault from a plain message.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::Fault;
    ///
    /// let fault = Fault::msg(format!("port {} unavailable", 8080));
    /// assert_eq!(fault.to_string(), "port 8080 unavailable");
    /// ```
    pub fn msg(message: impl fmt::Display) -> Self {
        Fault::Error(message.to_string().into())
    }

    /// Create a fault from a panic payload as returned by `catch_unwind`.
    ///
    /// `&str` and `String` payloads keep their text; anything else is
    /// rendered as `Box<dyn Any>`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "Box<dyn Any>".to_string(),
            },
        };
        Fault::Panic(message)
    }

    /// Returns `true` if the fault came from a panic.
    pub fn is_panic(&self) -> bool {
        matches!(self, Fault::Panic(_))
    }

    /// Attempt to view the underlying error as a concrete type.
    ///
    /// # Examples
    ///
    /// ```
    /// use either_io::Fault;
    /// use std::num::ParseIntError;
    ///
    /// let fault = Fault::from("x".parse::<i32>().unwrap_err());
    /// assert!(fault.downcast_ref::<ParseIntError>().is_some());
    /// ```
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        match self {
            Fault::Error(error) => error.downcast_ref::<E>(),
            Fault::Panic(_) => None,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Panic(message) => write!(f, "panicked: {}", message),
            Fault::Error(error) => write!(f, "{}", error),
        }
    }
}

impl<E> From<E> for Fault
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Fault::Error(Box::new(error))
    }
}

/// Run a synchronous callback, turning a panic into a [`Fault`].
pub(crate) fn capture<R>(f: impl FnOnce() -> R) -> Result<R, Fault> {
    catch_unwind(AssertUnwindSafe(f)).map_err(Fault::from_panic)
}

/// Drive a future to completion, turning a panic while polling into a [`Fault`].
pub(crate) async fn capture_future<Fut>(future: Fut) -> Result<Fut::Output, Fault>
where
    Fut: Future,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(Fault::from_panic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::ParseIntError;

    #[test]
    fn test_from_panic_str_payload() {
        let fault = Fault::from_panic(Box::new("boom"));
        assert!(fault.is_panic());
        assert_eq!(fault.to_string(), "panicked: boom");
    }

    #[test]
    fn test_from_panic_string_payload() {
        let fault = Fault::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(fault.to_string(), "panicked: owned boom");
    }

    #[test]
    fn test_from_panic_opaque_payload() {
        let fault = Fault::from_panic(Box::new(42_u8));
        assert_eq!(fault.to_string(), "panicked: Box<dyn Any>");
    }

    #[test]
    fn test_from_std_error() {
        let error = "abc".parse::<i32>().unwrap_err();
        let expected = error.to_string();
        let fault = Fault::from(error);

        assert!(!fault.is_panic());
        assert_eq!(fault.to_string(), expected);
        assert!(fault.downcast_ref::<ParseIntError>().is_some());
        assert!(fault.downcast_ref::<std::fmt::Error>().is_none());
    }

    #[test]
    fn test_msg() {
        let fault = Fault::msg("not ready");
        assert_eq!(fault.to_string(), "not ready");
        assert!(fault.downcast_ref::<ParseIntError>().is_none());
    }

    #[test]
    fn test_capture_passes_value_through() {
        assert_eq!(capture(|| 7).ok(), Some(7));
    }

    #[test]
    fn test_capture_turns_panic_into_fault() {
        let result = capture(|| -> i32 { panic!("sync boom") });
        match result {
            Err(Fault::Panic(message)) => assert_eq!(message, "sync boom"),
            other => panic!("expected panic fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_capture_future_turns_panic_into_fault() {
        let result = capture_future(async {
            if true {
                panic!("async boom");
            }
            1
        })
        .await;

        match result {
            Err(Fault::Panic(message)) => assert_eq!(message, "async boom"),
            other => panic!("expected panic fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_capture_future_passes_value_through() {
        assert_eq!(capture_future(async { 5 }).await.ok(), Some(5));
    }
}
