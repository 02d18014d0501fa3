//! # Stream items: the value/error duality.
//!
//! Everything pushed through a stream is an [`Item`]: either a success value
//! or a [`StreamError`]. `push` routes on the variant — values to the
//! (asynchronous) value channel, errors to the (synchronous) error channel.
//!
//! Plain values convert implicitly:
//! ```
//! use evstream::Item;
//!
//! let item: Item<u32> = 5.into();
//! assert!(item.is_value());
//! ```

use crate::error::StreamError;

/// A single dispatched item: success value or error.
#[derive(Debug, Clone, PartialEq)]
pub enum Item<T> {
    /// A success value, delivered asynchronously to value handlers.
    Value(T),
    /// An error, delivered synchronously to error handlers.
    Error(StreamError),
}

impl<T> Item<T> {
    /// Creates an error item from anything convertible into a message.
    ///
    /// Shorthand for `Item::Error(StreamError::message(..))`.
    pub fn error(message: impl Into<String>) -> Self {
        Item::Error(StreamError::message(message))
    }

    /// Returns `true` for [`Item::Value`].
    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self, Item::Value(_))
    }

    /// Returns `true` for [`Item::Error`].
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Item::Error(_))
    }
}

impl<T> From<T> for Item<T> {
    fn from(value: T) -> Self {
        Item::Value(value)
    }
}
