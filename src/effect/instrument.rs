//! Tracing support for effects. Feature-gated behind `tracing`.

use tracing::Instrument as _;

use super::EitherIO;
use crate::io::IO;

impl<E, T> EitherIO<E, T>
where
    E: Send + 'static,
    T: Send + 'static,
{
    /// Run every execution of this effect inside `span`.
    ///
    /// The span is entered each time the effect is polled and covers the
    /// whole chain built so far.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use either_io::{EitherIO, FailureFn, Fault};
    /// use tracing::info_span;
    ///
    /// let effect = EitherIO::from_fn(FailureFn::new(|f: Fault| f.to_string()), load_order)
    ///     .instrument(info_span!("load_order", order_id = %id));
    /// ```
    pub fn instrument(self, span: tracing::Span) -> Self {
        let inner = self.io;
        let io = IO::new(move || {
            let inner = inner.clone();
            async move { inner.run().await }.instrument(span.clone())
        });
        EitherIO {
            failure: self.failure,
            io,
        }
    }
}
