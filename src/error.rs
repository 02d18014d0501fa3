//! Error types carried on the stream error channel.
//!
//! Every item moving through a stream is either a value or a [`StreamError`].
//! Errors travel on a dedicated channel: they are delivered synchronously to
//! error handlers and are never passed through combinator functions or
//! predicates.
//!
//! The type provides helper methods (`as_label`, `as_message`) for
//! logging/metrics, mirroring the rest of the public surface.

use std::any::Any;

use thiserror::Error;

/// # Errors delivered through a stream's error channel.
///
/// A `StreamError` is a payload, not a control-flow failure: pushing one does
/// not tear the stream down. Downstream combinators forward it unchanged and
/// subscribers without an error handler ignore it.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// An error explicitly pushed by a producer.
    #[error("stream error: {message}")]
    Message {
        /// Human-readable description supplied by the producer.
        message: String,
    },

    /// A combinator function or predicate panicked while processing a value.
    ///
    /// The panic is caught at the delivery boundary and converted into this
    /// variant so it propagates on the error channel instead of killing the
    /// delivery worker.
    #[error("handler panicked: {info}")]
    HandlerPanic {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl StreamError {
    /// Creates a producer-originated error.
    ///
    /// # Example
    /// ```
    /// use evstream::StreamError;
    ///
    /// let err = StreamError::message("connection lost");
    /// assert_eq!(err.as_label(), "stream_message");
    /// ```
    pub fn message(message: impl Into<String>) -> Self {
        StreamError::Message {
            message: message.into(),
        }
    }

    /// Creates an error from a captured handler panic.
    pub fn handler_panic(info: impl Into<String>) -> Self {
        StreamError::HandlerPanic { info: info.into() }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::Message { .. } => "stream_message",
            StreamError::HandlerPanic { .. } => "handler_panic",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StreamError::Message { message } => message.clone(),
            StreamError::HandlerPanic { info } => format!("handler panic: {info}"),
        }
    }
}

/// Renders a panic payload as text.
///
/// Payloads raised via `panic!("...")` are `&'static str` or `String`;
/// anything else is reported as an unknown panic.
pub(crate) fn panic_info(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(StreamError::message("x").as_label(), "stream_message");
        assert_eq!(StreamError::handler_panic("y").as_label(), "handler_panic");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = StreamError::message("boom");
        assert_eq!(err.to_string(), "stream error: boom");

        let err = StreamError::handler_panic("index out of bounds");
        assert_eq!(err.to_string(), "handler panicked: index out of bounds");
    }

    #[test]
    fn test_panic_info_downcasts_common_payloads() {
        let static_payload: Box<dyn Any + Send> = Box::new("static msg");
        assert_eq!(panic_info(static_payload.as_ref()), "static msg");

        let string_payload: Box<dyn Any + Send> = Box::new(String::from("owned msg"));
        assert_eq!(panic_info(string_payload.as_ref()), "owned msg");

        let opaque_payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_info(opaque_payload.as_ref()), "unknown panic");
    }
}
