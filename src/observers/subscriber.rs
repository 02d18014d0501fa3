//! # Subscriber record and subscription identity.
//!
//! A [`Subscriber`] is a pair of optional callbacks registered against an
//! [`Observer`](crate::Observer): a value handler and an error handler.
//! Either side may be absent — a subscriber with no value handler only
//! observes errors, and vice versa.
//!
//! Records are assembled builder-style:
//! ```
//! use evstream::{StreamError, Subscriber};
//!
//! let sub: Subscriber<u32> = Subscriber::value(|v| println!("got {v}"))
//!     .with_error(|e: &StreamError| eprintln!("failed: {e}"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::StreamError;

/// Shared value handler invoked once per delivered value.
pub type OnValue<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Shared error handler invoked synchronously for each delivered error.
pub type OnError = Arc<dyn Fn(&StreamError) + Send + Sync>;

/// Identity of a registration within one observer.
///
/// Unique for the lifetime of the owning observer. There is no corresponding
/// unsubscribe operation; the id exists for identification purposes only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        SubscriptionId(raw)
    }

    /// Returns the raw id value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A pair of optional callbacks to register against an observer.
///
/// Built with [`Subscriber::value`], [`Subscriber::error`] or
/// [`Subscriber::empty`], then extended with the `with_*` methods.
pub struct Subscriber<T> {
    pub(crate) on_value: Option<OnValue<T>>,
    pub(crate) on_error: Option<OnError>,
}

impl<T> Subscriber<T> {
    /// Creates a record with neither handler set.
    ///
    /// Registering it still consumes a subscription id; deliveries to it are
    /// no-ops.
    pub fn empty() -> Self {
        Self {
            on_value: None,
            on_error: None,
        }
    }

    /// Creates a record with a value handler only.
    pub fn value(f: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::empty().with_value(f)
    }

    /// Creates a record with an error handler only.
    pub fn error(f: impl Fn(&StreamError) + Send + Sync + 'static) -> Self {
        Self::empty().with_error(f)
    }

    /// Sets (or replaces) the value handler.
    #[inline]
    pub fn with_value(mut self, f: impl Fn(T) + Send + Sync + 'static) -> Self {
        self.on_value = Some(Arc::new(f));
        self
    }

    /// Sets (or replaces) the error handler.
    #[inline]
    pub fn with_error(mut self, f: impl Fn(&StreamError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("on_value", &self.on_value.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
