//! # either-io
//!
//! Lazy asynchronous effects whose outcome is a typed [`Either`].
//!
//! An [`EitherIO<E, T>`] describes work that, when run, yields either a
//! failure of type `E` or a success of type `T`. Nothing executes until a
//! terminal method is called, and every run re-executes the whole chain.
//!
//! Expected failures travel as `Left` values. Unexpected ones (a panic in a
//! callback, or an `Err` from a fallible producer) are caught where they
//! happen and turned into `Left` by the effect's [`FailureFn`], so a chain
//! never leaks an untyped error.
//!
//! ## Quick Example
//!
//! ```rust
//! use either_io::{Either, EitherIO, FailureFn, Fault};
//!
//! #[derive(Debug, PartialEq)]
//! enum OrderError {
//!     OutOfStock,
//!     Unexpected(String),
//! }
//!
//! let failure = FailureFn::new(|fault: Fault| OrderError::Unexpected(fault.to_string()));
//!
//! let stock = EitherIO::from_fn(failure.clone(), || 3_u32);
//! let order = stock
//!     .filter(|| OrderError::OutOfStock, |available| *available >= 2)
//!     .map(|available| available - 2);
//!
//! assert_eq!(order.safe_run_blocking(), Either::right(1));
//!
//! let broken = EitherIO::<OrderError, u32>::from_fn(failure, || panic!("db offline"));
//! assert_eq!(
//!     broken.run_blocking(),
//!     Err(OrderError::Unexpected("panicked: db offline".to_string()))
//! );
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod effect;
pub mod either;
pub mod fault;
pub mod io;
pub mod testing;

// Re-exports
pub use effect::{EitherIO, FailureFn};
pub use either::Either;
pub use fault::Fault;
pub use io::IO;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::effect::{EitherIO, FailureFn};
    pub use crate::either::Either;
    pub use crate::fault::Fault;
    pub use crate::io::IO;
}
