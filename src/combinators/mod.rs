//! Stream combinators: deriving new streams from existing ones.
//!
//! Each combinator constructs a fresh downstream
//! [`EventStream`](crate::EventStream), subscribes to its source(s), and
//! forwards derived items — composition is a DAG of streams wired by
//! internal subscriptions, built lazily as combinators are called and rooted
//! at producer-created streams.
//!
//! ```text
//! source ──► map(f) ──► filter(p) ──► fold(f) ──► subscribers
//!    \
//!     ──► merge(other) ──► ...
//! ```
//!
//! ## Rules
//! - **Construction is silent**: calling a combinator never pushes a value;
//!   only a later `push`/`throw_error` on a source produces deliveries.
//! - **Errors are opaque**: combinator functions and predicates are never
//!   applied to errors; errors forward to the downstream error channel
//!   unchanged.
//! - **Panics become errors**: a panic inside a user function is caught and
//!   routed downstream as [`StreamError::HandlerPanic`]
//!   (see [`StreamError`](crate::StreamError)).
//!
//! Derived streams inherit the [`Config`](crate::Config) of their (left)
//! source stream.

mod filter;
mod fold;
mod map;
mod merge;
mod zip;

use std::panic::AssertUnwindSafe;

use crate::error::{StreamError, panic_info};

/// Runs a user-supplied function, converting a panic into a [`StreamError`].
pub(crate) fn catch_handler<R>(f: impl FnOnce() -> R) -> Result<R, StreamError> {
    std::panic::catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| StreamError::handler_panic(panic_info(payload.as_ref())))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::EventStream;

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_map_filter_fold_pipeline() {
        let source: EventStream<i64> = EventStream::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        source
            .map(|v| v * 2)
            .filter(|v| v % 4 == 0)
            .fold(|acc, v| acc + v)
            .on_value(move |v| sink.lock().unwrap().push(v));

        for v in 1..=4 {
            source.push(v);
        }
        settle().await;

        // doubled: [2,4,6,8] → divisible by 4: [4,8] → running sum: [4,12]
        assert_eq!(*seen.lock().unwrap(), vec![4, 12]);
    }

    #[tokio::test]
    async fn test_nested_filters_deliver_once() {
        let source: EventStream<i64> = EventStream::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        source
            .filter(|v| v % 2 == 0)
            .filter(|v| *v == 2)
            .on_value(move |v| sink.lock().unwrap().push(v));

        source.push(1);
        source.push(2);
        source.push(3);
        source.push(4);
        settle().await;

        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_error_reaches_the_end_of_a_chain() {
        let source: EventStream<i64> = EventStream::new();
        let errors = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&errors);
        source
            .map(|v| v + 1)
            .filter(|_| true)
            .fold(|acc, v| acc + v)
            .subscribe(crate::Subscriber::error(move |e| {
                sink.lock().unwrap().push(e.clone())
            }));

        source.throw_error(crate::StreamError::message("upstream"));
        // Error propagation is synchronous end to end.
        assert_eq!(
            *errors.lock().unwrap(),
            vec![crate::StreamError::message("upstream")]
        );
    }
}
