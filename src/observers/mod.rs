//! Subscriber registry and delivery.
//!
//! This module groups the subscription **data model** and the **delivery
//! mechanism** that sits underneath every stream:
//! - [`Subscriber`], [`SubscriptionId`] — a pair of optional callbacks and
//!   its identity within one observer;
//! - [`Observer`] — the insertion-ordered registry plus the per-subscriber
//!   delivery queues and workers.
//!
//! Streams delegate `push`/`throw_error`/`subscribe` here; see
//! [`EventStream`](crate::EventStream) for the handle type.

mod observer;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use observer::Observer;
pub use subscriber::{OnError, OnValue, Subscriber, SubscriptionId};

#[cfg(feature = "logging")]
pub use log::LogWriter;
