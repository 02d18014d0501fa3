//! # map: transform each delivered value.
//!
//! ```text
//! -----1-------2------3---------
//!      |       |      |
//!      |  x => x * 2  |
//!      v       v      v
//! -----2-------4------6---------
//! ```

use crate::combinators::catch_handler;
use crate::error::StreamError;
use crate::observers::Subscriber;
use crate::streams::EventStream;

impl<T: Send + 'static> EventStream<T> {
    /// Derives a stream that applies `f` to every delivered value.
    ///
    /// `f` runs exactly once per value, in delivery order; its result becomes
    /// the payload of the returned stream. Errors from the source bypass `f`
    /// and forward unchanged. A panic inside `f` is caught and pushed
    /// downstream as [`StreamError::HandlerPanic`].
    ///
    /// ## Example
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use std::time::Duration;
    /// use evstream::EventStream;
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() {
    ///     let numbers: EventStream<u32> = EventStream::new();
    ///     let seen = Arc::new(Mutex::new(Vec::new()));
    ///
    ///     let sink = Arc::clone(&seen);
    ///     numbers.map(|v| v * 2).on_value(move |v| sink.lock().unwrap().push(v));
    ///
    ///     numbers.push(2);
    ///     tokio::time::sleep(Duration::from_millis(10)).await;
    ///     assert_eq!(*seen.lock().unwrap(), vec![4]);
    /// }
    /// ```
    pub fn map<U, F>(&self, f: F) -> EventStream<U>
    where
        U: Clone + Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let out = EventStream::with_config(self.config().clone());

        let values = out.clone();
        let errors = out.clone();
        self.subscribe(
            Subscriber::value(move |v: T| match catch_handler(|| f(v)) {
                Ok(mapped) => {
                    values.push(mapped);
                }
                Err(panic) => values.throw_error(panic),
            })
            .with_error(move |e: &StreamError| errors.throw_error(e.clone())),
        );

        out
    }
}
