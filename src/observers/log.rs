//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints every delivered value and error to stdout in a
//! human-readable format. This is primarily useful for development,
//! debugging, and examples.
//!
//! ## Output format
//! ```text
//! [value] stream=clicks value=42
//! [error] stream=clicks err=stream_message detail="connection lost"
//! ```

use std::borrow::Cow;
use std::fmt::Debug;

use crate::observers::subscriber::{Subscriber, SubscriptionId};
use crate::streams::EventStream;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Attach it to any stream whose values
/// are `Debug` to trace what flows through during development.
///
/// Not intended for production use — register a custom [`Subscriber`] for
/// structured logging or metrics collection.
pub struct LogWriter {
    label: Cow<'static, str>,
}

impl LogWriter {
    /// Creates a writer that tags each line with `label`.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Subscribes the writer to `stream` and returns the subscription id.
    pub fn attach<T>(&self, stream: &EventStream<T>) -> SubscriptionId
    where
        T: Debug + Send + 'static,
    {
        let value_label = self.label.clone();
        let error_label = self.label.clone();
        stream.subscribe(
            Subscriber::value(move |v: T| {
                println!("[value] stream={value_label} value={v:?}");
            })
            .with_error(move |e| {
                println!(
                    "[error] stream={error_label} err={} detail={:?}",
                    e.as_label(),
                    e.as_message()
                );
            }),
        )
    }
}

impl Default for LogWriter {
    /// Returns a writer labelled `stream`.
    fn default() -> Self {
        Self::new("stream")
    }
}
