//! # EventStream: the push/subscribe handle.
//!
//! [`EventStream`] is a thin delegating wrapper around exactly one
//! [`Observer`]: `push` and `throw_error` forward to it, `subscribe`
//! registers against it. Producers push, consumers subscribe, and the
//! combinators (`map`, `filter`, `fold`, `merge`, `zip`) derive new streams
//! by doing both internally.
//!
//! ```text
//! producer ── push(v) ──► EventStream ──► Observer ──► subscribers
//!                             ▲
//!        subscribe(on_value, on_error)
//! ```
//!
//! ## Ownership
//! `EventStream::new` creates a private observer owned exclusively by the
//! stream. Cloning the stream clones the *handle*, not the subscriber set —
//! clones forward into the same observer. Constructing a stream over an
//! explicitly shared observer ([`EventStream::with_observer`]) is an accepted
//! escape hatch for fanning several handles into one subscriber set.

use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::error::StreamError;
use crate::observers::{Observer, Subscriber, SubscriptionId};
use crate::streams::Item;

/// A handle through which values and errors are pushed, and to which
/// consumers subscribe.
///
/// ## Example
/// ```
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
/// use evstream::EventStream;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let clicks: EventStream<u32> = EventStream::new();
///     let seen = Arc::new(Mutex::new(Vec::new()));
///
///     let sink = Arc::clone(&seen);
///     clicks.on_value(move |v| sink.lock().unwrap().push(v));
///
///     clicks.push(1);
///     clicks.push(2);
///
///     // Delivery is deferred to the next turn of the scheduler.
///     tokio::time::sleep(Duration::from_millis(10)).await;
///     assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// }
/// ```
pub struct EventStream<T> {
    observer: Arc<Observer<T>>,
}

impl<T> EventStream<T> {
    /// Creates a stream with a fresh, exclusively owned observer.
    pub fn new() -> Self {
        Self::with_observer(Arc::new(Observer::new()))
    }

    /// Creates a stream whose observer uses the given configuration.
    pub fn with_config(cfg: Config) -> Self {
        Self::with_observer(Arc::new(Observer::with_config(cfg)))
    }

    /// Creates a stream over an existing observer.
    ///
    /// All handles built over the same observer forward into the same
    /// subscriber set.
    pub fn with_observer(observer: Arc<Observer<T>>) -> Self {
        Self { observer }
    }

    /// Returns the underlying observer.
    #[inline]
    pub fn observer(&self) -> &Arc<Observer<T>> {
        &self.observer
    }

    /// Returns the stream's configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        self.observer.config()
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.observer.subscriber_count()
    }

    /// Pushes an error to the stream's error channel.
    ///
    /// Every subscriber's error handler runs synchronously, in registration
    /// order, before this returns.
    pub fn throw_error(&self, err: StreamError) {
        self.observer.throw_error(err);
    }
}

impl<T: Send + 'static> EventStream<T> {
    /// Registers a subscriber record and returns its unique id.
    ///
    /// Values are only observable through a subscription; pushes that happen
    /// before any subscriber is registered are dropped silently.
    pub fn subscribe(&self, subscriber: Subscriber<T>) -> SubscriptionId {
        self.observer.subscribe(subscriber)
    }

    /// Subscribes a value handler only.
    pub fn on_value(&self, f: impl Fn(T) + Send + Sync + 'static) -> SubscriptionId {
        self.subscribe(Subscriber::value(f))
    }

    /// Subscribes a value handler and an error handler.
    pub fn on_value_and_error(
        &self,
        on_value: impl Fn(T) + Send + Sync + 'static,
        on_error: impl Fn(&StreamError) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribe(Subscriber::value(on_value).with_error(on_error))
    }
}

impl<T: Clone + Send + 'static> EventStream<T> {
    /// Pushes an item to the stream.
    ///
    /// Returns `true` when the item was dispatched on the value channel;
    /// pushing an [`Item::Error`] routes it to the error channel instead and
    /// returns `false`.
    pub fn push(&self, item: impl Into<Item<T>>) -> bool {
        self.observer.push(item)
    }
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            observer: Arc::clone(&self.observer),
        }
    }
}

impl<T> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
