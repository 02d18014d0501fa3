//! # filter: keep values matching a predicate.
//!
//! ```text
//! -----1-------2-------3---------
//!      |       |       |
//!       x => x % 2 == 0
//!              v
//! -------------2-----------------
//! ```

use crate::combinators::catch_handler;
use crate::error::StreamError;
use crate::observers::Subscriber;
use crate::streams::EventStream;

impl<T: Clone + Send + 'static> EventStream<T> {
    /// Derives a stream that forwards only values for which `pred` is true.
    ///
    /// Rejected values are dropped silently — no emission, no error. Errors
    /// from the source are always forwarded and never see `pred`. A panic
    /// inside `pred` is caught and pushed downstream as
    /// [`StreamError::HandlerPanic`].
    pub fn filter<F>(&self, pred: F) -> EventStream<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let out = EventStream::with_config(self.config().clone());

        let values = out.clone();
        let errors = out.clone();
        self.subscribe(
            Subscriber::value(move |v: T| match catch_handler(|| pred(&v)) {
                Ok(true) => {
                    values.push(v);
                }
                Ok(false) => {}
                Err(panic) => values.throw_error(panic),
            })
            .with_error(move |e: &StreamError| errors.throw_error(e.clone())),
        );

        out
    }
}
