//! # Subscriber registry and delivery core.
//!
//! [`Observer`] owns an insertion-ordered registry of subscribers and
//! delivers pushed items to them. It is the mechanism underneath every
//! [`EventStream`](crate::EventStream); streams are thin handles over it.
//!
//! ## Architecture
//! ```text
//! push(value)
//!     │  snapshot queues under the registry lock, then send
//!     ├──► [queue 1] ──► worker 1 ──► on_value(value)
//!     │    (mpsc)            └──────► panic caught, worker keeps draining
//!     ├──► [queue 2] ──► worker 2 ──► on_value(value)
//!     └──► [queue N] ──► worker N ──► on_value(value)
//!
//! throw_error(err)
//!     │  snapshot handlers, release the lock
//!     └──► on_error(&err) for each, synchronously, in registration order
//! ```
//!
//! ## Rules
//! - **Deferred value delivery**: `push` never runs a value handler inline;
//!   values are enqueued and handlers run after the current call stack
//!   unwinds (per-subscriber FIFO, no cross-subscriber ordering).
//! - **Synchronous error delivery**: `throw_error` runs every error handler
//!   before returning, in registration order.
//! - **Fire-and-forget**: a value pushed with zero registered value handlers
//!   is dropped silently; same for errors with zero error handlers.
//! - **Grow-only registry**: `subscribe` appends, nothing removes. Reentrant
//!   `subscribe` from inside a handler is safe — delivery iterates over a
//!   snapshot, never over the live registry.
//!
//! ## Panic isolation
//! Worker tasks wrap handler invocation in `catch_unwind`: a panicking value
//! handler does not kill its worker, and later values for that subscriber are
//! still delivered.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use rand::Rng;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::StreamError;
use crate::observers::subscriber::{OnError, OnValue, Subscriber, SubscriptionId};
use crate::streams::Item;

/// Sending half of one subscriber's delivery queue.
enum ValueQueue<T> {
    /// Bounded queue: values are dropped when it is full.
    Bounded(mpsc::Sender<T>),
    /// Unbounded queue: delivery is lossless for a live subscriber.
    Unbounded(mpsc::UnboundedSender<T>),
}

impl<T> ValueQueue<T> {
    /// Enqueues a value without blocking. A full or closed queue drops it.
    fn send(&self, value: T) {
        match self {
            ValueQueue::Bounded(tx) => {
                let _ = tx.try_send(value);
            }
            ValueQueue::Unbounded(tx) => {
                let _ = tx.send(value);
            }
        }
    }
}

impl<T> Clone for ValueQueue<T> {
    fn clone(&self) -> Self {
        match self {
            ValueQueue::Bounded(tx) => ValueQueue::Bounded(tx.clone()),
            ValueQueue::Unbounded(tx) => ValueQueue::Unbounded(tx.clone()),
        }
    }
}

/// Receiving half matching [`ValueQueue`].
enum ValueRx<T> {
    Bounded(mpsc::Receiver<T>),
    Unbounded(mpsc::UnboundedReceiver<T>),
}

impl<T> ValueRx<T> {
    async fn recv(&mut self) -> Option<T> {
        match self {
            ValueRx::Bounded(rx) => rx.recv().await,
            ValueRx::Unbounded(rx) => rx.recv().await,
        }
    }
}

/// One registration: identity plus the optional delivery endpoints.
struct Entry<T> {
    id: SubscriptionId,
    queue: Option<ValueQueue<T>>,
    on_error: Option<OnError>,
}

/// Subscriber registry and delivery mechanism underlying a stream.
///
/// Usually created implicitly by [`EventStream::new`](crate::EventStream::new)
/// and owned exclusively by that stream. Passing an `Arc<Observer<T>>` to
/// [`EventStream::with_observer`](crate::EventStream::with_observer) instead
/// shares one subscriber set across several stream handles — an accepted
/// escape hatch, not the common path.
pub struct Observer<T> {
    cfg: Config,
    registry: Mutex<Vec<Entry<T>>>,
}

impl<T> Observer<T> {
    /// Creates an observer with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an observer with the given configuration.
    pub fn with_config(cfg: Config) -> Self {
        Self {
            cfg,
            registry: Mutex::new(Vec::new()),
        }
    }

    /// Returns the observer's configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.registry().len()
    }

    /// Synchronously invokes every registered error handler with `err`.
    ///
    /// Handlers run in registration order, before this method returns.
    /// Subscribers without an error handler ignore the error; zero handlers
    /// make this a no-op.
    pub fn throw_error(&self, err: StreamError) {
        let handlers: Vec<OnError> = self
            .registry()
            .iter()
            .filter_map(|entry| entry.on_error.clone())
            .collect();
        for handler in &handlers {
            handler(&err);
        }
    }

    /// Locks the registry, recovering from a poisoned lock.
    ///
    /// Handlers never run under this lock, so poisoning is not reachable
    /// through delivery; recovery keeps the registry usable regardless.
    fn registry(&self) -> MutexGuard<'_, Vec<Entry<T>>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send + 'static> Observer<T> {
    /// Registers a subscriber and returns its unique id.
    ///
    /// If the record carries a value handler, a dedicated delivery queue and
    /// worker task are set up for it (requires a tokio runtime). Ids are
    /// drawn at random from `Config::id_space`; collisions are retried up to
    /// `Config::id_retries` times and then resolved deterministically, so the
    /// returned id is always unique within this observer.
    ///
    /// There is no unsubscribe: the registration lives as long as the
    /// observer.
    pub fn subscribe(&self, subscriber: Subscriber<T>) -> SubscriptionId {
        let Subscriber { on_value, on_error } = subscriber;
        let queue = on_value.map(|handler| spawn_worker(handler, self.cfg.queue_capacity_limit()));

        let mut entries = self.registry();
        let id = next_free_id(&entries, &self.cfg);
        entries.push(Entry {
            id,
            queue,
            on_error,
        });
        id
    }
}

impl<T: Clone + Send + 'static> Observer<T> {
    /// Routes an item to the matching channel.
    ///
    /// An [`Item::Value`] is enqueued for asynchronous delivery to every
    /// subscriber with a value handler and `true` is returned. An
    /// [`Item::Error`] is delegated to [`throw_error`](Observer::throw_error)
    /// and `false` is returned, signalling that nothing was dispatched on the
    /// value channel.
    pub fn push(&self, item: impl Into<Item<T>>) -> bool {
        match item.into() {
            Item::Value(value) => {
                let queues: Vec<ValueQueue<T>> = self
                    .registry()
                    .iter()
                    .filter_map(|entry| entry.queue.clone())
                    .collect();
                for queue in &queues {
                    queue.send(value.clone());
                }
                true
            }
            Item::Error(err) => {
                self.throw_error(err);
                false
            }
        }
    }
}

impl<T> Default for Observer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Spawns the delivery worker for one subscriber and returns its queue.
fn spawn_worker<T: Send + 'static>(handler: OnValue<T>, capacity: Option<usize>) -> ValueQueue<T> {
    let (queue, mut rx) = match capacity {
        None => {
            let (tx, rx) = mpsc::unbounded_channel::<T>();
            (ValueQueue::Unbounded(tx), ValueRx::Unbounded(rx))
        }
        Some(cap) => {
            let (tx, rx) = mpsc::channel::<T>(cap);
            (ValueQueue::Bounded(tx), ValueRx::Bounded(rx))
        }
    };

    tokio::spawn(async move {
        while let Some(value) = rx.recv().await {
            let h = Arc::clone(&handler);
            let fut = async move { h(value) };
            // A panicking handler is isolated; the worker keeps draining.
            let _ = AssertUnwindSafe(fut).catch_unwind().await;
        }
    });

    queue
}

/// Picks an id not present in `entries`.
///
/// Random draws come from `[0, id_space)`; after `id_retries` collisions the
/// fallback takes the smallest id above every existing one, which cannot
/// collide. The collision path is never surfaced to the caller.
fn next_free_id<T>(entries: &[Entry<T>], cfg: &Config) -> SubscriptionId {
    let space = cfg.id_space_clamped();
    let taken = |raw: u64| entries.iter().any(|entry| entry.id.get() == raw);

    let mut rng = rand::rng();
    for _ in 0..cfg.id_retries {
        let candidate = rng.random_range(0..space);
        if !taken(candidate) {
            return SubscriptionId::new(candidate);
        }
    }

    let next = entries
        .iter()
        .map(|entry| entry.id.get())
        .max()
        .map_or(0, |highest| highest + 1);
    SubscriptionId::new(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[test]
    fn test_push_without_subscribers_is_a_noop() {
        let obs: Observer<u32> = Observer::new();
        assert!(obs.push(1));
        assert_eq!(obs.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_value_delivery_is_deferred() {
        let obs: Observer<u32> = Observer::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        obs.subscribe(Subscriber::value(move |v| sink.lock().unwrap().push(v)));

        assert!(obs.push(7));
        // Nothing runs until the current task yields.
        assert!(seen.lock().unwrap().is_empty());

        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn test_values_keep_per_subscriber_order() {
        let obs: Observer<u32> = Observer::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        obs.subscribe(Subscriber::value(move |v| sink.lock().unwrap().push(v)));

        for v in 1..=5 {
            obs.push(v);
        }
        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_error_delivery_is_synchronous_in_registration_order() {
        let obs: Observer<u32> = Observer::new();
        let order = Arc::new(StdMutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let sink = Arc::clone(&order);
            obs.subscribe(Subscriber::error(move |_| sink.lock().unwrap().push(tag)));
        }

        obs.throw_error(StreamError::message("boom"));
        // No yield needed: handlers ran before throw_error returned.
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_push_error_item_routes_to_error_channel() {
        let obs: Observer<u32> = Observer::new();
        let errors = Arc::new(StdMutex::new(Vec::new()));

        let sink = Arc::clone(&errors);
        obs.subscribe(Subscriber::error(move |e: &StreamError| {
            sink.lock().unwrap().push(e.clone())
        }));

        let dispatched = obs.push(Item::Error(StreamError::message("bad")));
        assert!(!dispatched);
        assert_eq!(*errors.lock().unwrap(), vec![StreamError::message("bad")]);
    }

    #[test]
    fn test_subscriber_without_error_handler_ignores_errors() {
        let obs: Observer<u32> = Observer::new();
        obs.subscribe(Subscriber::empty());
        // Must not panic or invoke anything.
        obs.throw_error(StreamError::message("ignored"));
    }

    #[test]
    fn test_ids_unique_under_adversarial_id_space() {
        let obs: Observer<u32> = Observer::with_config(Config {
            id_space: 1,
            id_retries: 4,
            ..Config::default()
        });

        let mut ids = HashSet::new();
        for _ in 0..16 {
            let id = obs.subscribe(Subscriber::error(|_| {}));
            assert!(ids.insert(id), "duplicate subscription id {id}");
        }
        assert_eq!(obs.subscriber_count(), 16);
    }

    #[test]
    fn test_reentrant_subscribe_from_error_handler() {
        let obs: Arc<Observer<u32>> = Arc::new(Observer::new());
        let inner_hits = Arc::new(StdMutex::new(0_u32));

        let reentrant = Arc::clone(&obs);
        let hits = Arc::clone(&inner_hits);
        obs.subscribe(Subscriber::error(move |_| {
            let hits = Arc::clone(&hits);
            reentrant.subscribe(Subscriber::error(move |_| {
                *hits.lock().unwrap() += 1;
            }));
        }));

        obs.throw_error(StreamError::message("one"));
        assert_eq!(obs.subscriber_count(), 2);
        // The subscriber added mid-delivery did not see the in-flight error...
        assert_eq!(*inner_hits.lock().unwrap(), 0);

        // ...but it is never skipped for subsequent deliveries.
        obs.throw_error(StreamError::message("two"));
        assert_eq!(*inner_hits.lock().unwrap(), 1);
        assert_eq!(obs.subscriber_count(), 3);
    }

    #[tokio::test]
    async fn test_bounded_queue_drops_on_overflow() {
        let obs: Observer<u32> = Observer::with_config(Config {
            queue_capacity: 1,
            ..Config::default()
        });
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        obs.subscribe(Subscriber::value(move |v| sink.lock().unwrap().push(v)));

        // No yield between pushes: the worker cannot drain, so only the first
        // value fits the capacity-1 queue.
        obs.push(1);
        obs.push(2);
        obs.push(3);

        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_panicking_value_handler_is_isolated() {
        let obs: Observer<u32> = Observer::new();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        obs.subscribe(Subscriber::value(move |v| {
            if v == 2 {
                panic!("handler blew up");
            }
            sink.lock().unwrap().push(v);
        }));

        obs.push(1);
        obs.push(2);
        obs.push(3);

        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
    }
}
