//! # evstream
//!
//! **evstream** is a minimal push-based reactive stream library for Rust.
//!
//! It provides a single-producer / multi-subscriber event primitive
//! ([`EventStream`], backed by an [`Observer`]) with transformation
//! combinators — `map`, `filter`, `fold`, `merge`, `zip` — and error
//! propagation through a dedicated error channel. The crate is designed as a
//! building block for event-driven components, not as a full Rx
//! implementation.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐        ┌──────────────┐
//!     │  producer A  │        │  producer B  │
//!     └──────┬───────┘        └──────┬───────┘
//!            │ push(v) / throw_error(e)
//!            ▼                       ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  EventStream (handle)                                     │
//! │  └── Observer (subscriber registry + delivery)            │
//! │        ├─ value channel: per-subscriber queue + worker    │
//! │        │  (deferred, per-subscriber FIFO)                 │
//! │        └─ error channel: synchronous, registration order  │
//! └──────┬──────────────┬──────────────┬─────────────────────┘
//!        ▼              ▼              ▼
//!   [queue S1]     [queue S2]     [queue SN]
//!        ▼              ▼              ▼
//!    worker S1      worker S2      worker SN
//!        ▼              ▼              ▼
//!   s1.on_value    s2.on_value    sN.on_value
//! ```
//!
//! ### Composition
//! Combinators derive new streams by subscribing internally and re-pushing:
//! ```text
//! source ──► map(f) ──► filter(p) ──► fold(f) ──► subscribers
//! ```
//! the result is a DAG of streams rooted at producer-created sources, built
//! lazily as combinators are called. Constructing a combinator never pushes
//! a value; only `push`/`throw_error` on a source produces deliveries.
//!
//! ## Delivery model
//! - **Values are deferred**: `push` enqueues; handlers run after the
//!   current call stack unwinds (producer and subscriber stacks stay
//!   decoupled). Per-subscriber order matches push order.
//! - **Errors are synchronous**: `throw_error` runs every error handler
//!   before it returns, in registration order.
//! - **Fire-and-forget**: items delivered with zero matching handlers are
//!   dropped silently; subscription happens once, at graph-construction
//!   time, before producers typically start pushing.
//! - There is no unsubscription and no backpressure in this core.
//!
//! ## Features
//! | Area            | Description                                               | Key types                       |
//! |-----------------|-----------------------------------------------------------|---------------------------------|
//! | **Streams**     | Push values/errors, subscribe callbacks.                  | [`EventStream`], [`Item`]       |
//! | **Subscribers** | Pairs of optional value/error handlers with unique ids.   | [`Subscriber`], [`SubscriptionId`] |
//! | **Combinators** | Derive new streams from existing ones.                    | `map`, `filter`, `fold`, `merge`, `zip` |
//! | **Errors**      | Typed error payloads on the error channel.                | [`StreamError`]                 |
//! | **Sequences**   | Pull-based lazy cons lists (`range`, `take`, ...).        | [`seq::Seq`]                    |
//! | **Configuration** | Queue capacity and id-generation knobs.                 | [`Config`]                      |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//! use evstream::{EventStream, StreamError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let clicks: EventStream<i64> = EventStream::new();
//!     let seen = Arc::new(Mutex::new(Vec::new()));
//!     let errors = Arc::new(Mutex::new(Vec::new()));
//!
//!     let value_sink = Arc::clone(&seen);
//!     let error_sink = Arc::clone(&errors);
//!     clicks
//!         .map(|v| v * 2)
//!         .filter(|v| *v > 2)
//!         .on_value_and_error(
//!             move |v| value_sink.lock().unwrap().push(v),
//!             move |e| error_sink.lock().unwrap().push(e.clone()),
//!         );
//!
//!     clicks.push(1); // doubled to 2, filtered out
//!     clicks.push(2); // doubled to 4, delivered
//!     clicks.throw_error(StreamError::message("sensor offline"));
//!
//!     tokio::time::sleep(Duration::from_millis(10)).await;
//!     assert_eq!(*seen.lock().unwrap(), vec![4]);
//!     assert_eq!(errors.lock().unwrap().len(), 1);
//! }
//! ```

mod combinators;
mod config;
mod error;
mod observers;
mod streams;

pub mod seq;

// ---- Public re-exports ----

pub use config::Config;
pub use error::StreamError;
pub use observers::{Observer, OnError, OnValue, Subscriber, SubscriptionId};
pub use streams::{EventStream, Item};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
