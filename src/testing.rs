//! Testing utilities for code built on effects
//!
//! Assertion macros for [`Either`](crate::Either) outcomes and, with the
//! `proptest` feature, an `Arbitrary` implementation so outcomes can be
//! generated in property tests.
//!
//! # Examples
//!
//! ```rust
//! use either_io::{assert_left, assert_right, EitherIO, FailureFn, Fault};
//!
//! let failure = FailureFn::new(|fault: Fault| fault.to_string());
//!
//! let ok = EitherIO::of(failure.clone(), 42).map(|x| x * 2);
//! assert_right!(ok.safe_run_blocking(), 84);
//!
//! let failed = EitherIO::<String, i32>::raise(|| "denied".to_string());
//! assert_left!(failed.safe_run_blocking());
//! ```

/// Assert that an outcome is `Right`, optionally with a specific value.
///
/// This macro will panic if the outcome is a `Left`.
///
/// # Example
///
/// ```rust
/// use either_io::{assert_right, Either};
///
/// let outcome = Either::<String, _>::right(42);
/// assert_right!(outcome.clone());
/// assert_right!(outcome, 42);
/// ```
#[macro_export]
macro_rules! assert_right {
    ($outcome:expr) => {
        match $outcome {
            $crate::Either::Right(_) => {}
            $crate::Either::Left(e) => {
                panic!("Expected Right, got Left: {:?}", e);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Either::Right(value) => {
                assert_eq!(value, $expected);
            }
            $crate::Either::Left(e) => {
                panic!("Expected Right({:?}), got Left: {:?}", $expected, e);
            }
        }
    };
}

/// Assert that an outcome is `Left`, optionally with a specific failure.
///
/// This macro will panic if the outcome is a `Right`.
///
/// # Example
///
/// ```rust
/// use either_io::{assert_left, Either};
///
/// let outcome = Either::<_, i32>::left("not found");
/// assert_left!(outcome);
/// assert_left!(outcome, "not found");
/// ```
#[macro_export]
macro_rules! assert_left {
    ($outcome:expr) => {
        match $outcome {
            $crate::Either::Left(_) => {}
            $crate::Either::Right(v) => {
                panic!("Expected Left, got Right: {:?}", v);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Either::Left(error) => {
                assert_eq!(error, $expected);
            }
            $crate::Either::Right(v) => {
                panic!("Expected Left({:?}), got Right: {:?}", $expected, v);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use crate::Either;
#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for Either<L, R>
where
    L: Arbitrary + 'static,
    R: Arbitrary + 'static,
    L::Strategy: 'static,
    R::Strategy: 'static,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (l_params, r_params) = args;
        prop_oneof![
            any_with::<L>(l_params).prop_map(Either::Left),
            any_with::<R>(r_params).prop_map(Either::Right),
        ]
        .boxed()
    }
}
