//! The two-branch outcome produced by every effect.
//!
//! `Either<L, R>` holds exactly one of a failure value (`Left`) or a success
//! value (`Right`). It is immutable and carries no behaviour beyond branch
//! inspection and transformation; sequencing and fault capture live on
//! [`EitherIO`](crate::EitherIO).
//!
//! # Right-Biased Convention
//!
//! `Right` is the happy path. `map` and `and_then` operate on `Right`;
//! `map_left` and `or_else` are their mirrors on `Left`.
//!
//! # Examples
//!
//! ```rust
//! use either_io::Either;
//!
//! fn parse_port(raw: &str) -> Either<String, u16> {
//!     match raw.parse::<u16>() {
//!         Ok(port) => Either::right(port),
//!         Err(_) => Either::left(format!("invalid port: {}", raw)),
//!     }
//! }
//!
//! assert_eq!(parse_port("8080"), Either::right(8080));
//! assert!(parse_port("http").is_left());
//!
//! let description = parse_port("80").fold(|err| err, |port| format!("port {}", port));
//! assert_eq!(description, "port 80");
//! ```

/// A value that is either a failure `Left(L)` or a success `Right(R)`.
///
/// # Example
///
/// ```rust
/// use either_io::Either;
///
/// let failed: Either<&str, i32> = Either::left("bad input");
/// let succeeded: Either<&str, i32> = Either::right(42);
///
/// match succeeded {
///     Either::Left(err) => println!("failed: {}", err),
///     Either::Right(n) => println!("got {}", n),
/// }
/// assert!(failed.is_left());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The failure branch
    Left(L),
    /// The success branch
    Right(R),
}

impl<L, R> Either<L, R> {
    // ========== Constructors ==========

    /// Create a failure outcome.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a success outcome.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    // ========== Branch tests ==========

    /// Returns `true` if this is a failure.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a success.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    // ========== Extractors ==========

    /// Returns the failure value if present, consuming self.
    ///
    /// ```rust
    /// use either_io::Either;
    ///
    /// assert_eq!(Either::<i32, &str>::left(3).into_left(), Some(3));
    /// assert_eq!(Either::<i32, &str>::right("ok").into_left(), None);
    /// ```
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the success value if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Borrow both branches.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Extract the failure value.
    ///
    /// # Panics
    ///
    /// Panics if the value is a `Right`.
    ///
    /// ```rust
    /// use either_io::Either;
    ///
    /// let e: Either<&str, i32> = Either::left("denied");
    /// assert_eq!(e.unwrap_left(), "denied");
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap_left(self) -> L {
        match self {
            Either::Left(l) => l,
            Either::Right(_) => panic!("called `Either::unwrap_left()` on a `Right` value"),
        }
    }

    /// Extract the success value.
    ///
    /// # Panics
    ///
    /// Panics if the value is a `Left`.
    #[inline]
    #[track_caller]
    pub fn unwrap_right(self) -> R {
        match self {
            Either::Left(_) => panic!("called `Either::unwrap_right()` on a `Left` value"),
            Either::Right(r) => r,
        }
    }

    // ========== Transformations ==========

    /// Transform the success value, passing failures through unchanged.
    ///
    /// ```rust
    /// use either_io::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(21);
    /// assert_eq!(e.map(|x| x * 2), Either::right(42));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the failure value, passing successes through unchanged.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform both branches.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, f: F, g: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(g(r)),
        }
    }

    /// Chain a computation on the success value.
    ///
    /// ```rust
    /// use either_io::Either;
    ///
    /// let half = |x: i32| {
    ///     if x % 2 == 0 { Either::right(x / 2) } else { Either::left("odd") }
    /// };
    /// assert_eq!(Either::right(8).and_then(half), Either::right(4));
    /// assert_eq!(Either::right(3).and_then(half), Either::left("odd"));
    /// ```
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Chain a computation on the failure value.
    #[inline]
    pub fn or_else<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Either<L2, R>,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Fold both branches into a single value.
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    /// Swap the branches.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// Convert to a `Result`, with `Left` as the error.
    ///
    /// ```rust
    /// use either_io::Either;
    ///
    /// let e: Either<&str, i32> = Either::left("nope");
    /// assert_eq!(e.into_result(), Err("nope"));
    /// ```
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Build from a `Result`, with `Err` becoming `Left`.
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

impl<L, R> Either<L, Either<L, R>> {
    /// Flatten a nested success.
    #[inline]
    pub fn flatten(self) -> Either<L, R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(inner) => inner,
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        Either::from_result(result)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}
