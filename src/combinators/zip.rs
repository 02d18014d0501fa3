//! # zip: pair two streams index by index.
//!
//! ```text
//! ------1--------2--------3-------
//!
//! ----------A---------B-----------
//!           |         |
//!           v         v
//! -------(1,A)-----(2,B)----------
//! ```
//!
//! Pairing is *index-aligned*, not wall-clock simultaneity: the n-th emitted
//! pair joins the n-th value of each source, with the side that runs ahead
//! buffered until the lagging side catches up.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StreamError;
use crate::observers::Subscriber;
use crate::streams::EventStream;

/// FIFO buffers for the side that runs ahead.
///
/// Invariant: at most one of the two buffers is non-empty at any time — a
/// value that can be paired immediately is never buffered.
struct ZipBuffers<T, U> {
    left: VecDeque<T>,
    right: VecDeque<U>,
}

impl<T, U> ZipBuffers<T, U> {
    fn new() -> Self {
        Self {
            left: VecDeque::new(),
            right: VecDeque::new(),
        }
    }
}

impl<T: Clone + Send + 'static> EventStream<T> {
    /// Derives a stream of index-aligned pairs from two sources.
    ///
    /// A value arriving on one side is paired with the oldest buffered value
    /// of the other side, or buffered if the other side has nothing pending.
    /// Pairs are emitted in formation order. Errors from either source bypass
    /// the buffers and forward immediately to the error channel.
    pub fn zip<U>(&self, other: &EventStream<U>) -> EventStream<(T, U)>
    where
        U: Clone + Send + 'static,
    {
        let out = EventStream::with_config(self.config().clone());
        let buffers: Arc<Mutex<ZipBuffers<T, U>>> = Arc::new(Mutex::new(ZipBuffers::new()));

        let state = Arc::clone(&buffers);
        let values = out.clone();
        let errors = out.clone();
        self.subscribe(
            Subscriber::value(move |v: T| {
                // Lock held through the push so pairs emit in formation order.
                let mut buf = state.lock().unwrap_or_else(PoisonError::into_inner);
                match buf.right.pop_front() {
                    Some(u) => {
                        values.push((v, u));
                    }
                    None => buf.left.push_back(v),
                }
            })
            .with_error(move |e: &StreamError| errors.throw_error(e.clone())),
        );

        let state = Arc::clone(&buffers);
        let values = out.clone();
        let errors = out.clone();
        other.subscribe(
            Subscriber::value(move |u: U| {
                let mut buf = state.lock().unwrap_or_else(PoisonError::into_inner);
                match buf.left.pop_front() {
                    Some(v) => {
                        values.push((v, u));
                    }
                    None => buf.right.push_back(u),
                }
            })
            .with_error(move |e: &StreamError| errors.throw_error(e.clone())),
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::{EventStream, StreamError, Subscriber};

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_zip_pairs_values_index_by_index() {
        let left: EventStream<u32> = EventStream::new();
        let right: EventStream<&'static str> = EventStream::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        left.zip(&right)
            .on_value(move |pair| sink.lock().unwrap().push(pair));

        left.push(1);
        left.push(2);
        left.push(3);
        right.push("a");
        right.push("b");
        settle().await;

        // The unpaired 3 stays buffered; nothing is emitted for it.
        assert_eq!(*seen.lock().unwrap(), vec![(1, "a"), (2, "b")]);

        right.push("c");
        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![(1, "a"), (2, "b"), (3, "c")]);
    }

    #[tokio::test]
    async fn test_zip_pairs_when_the_right_side_leads() {
        let left: EventStream<u32> = EventStream::new();
        let right: EventStream<u32> = EventStream::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        left.zip(&right)
            .on_value(move |pair| sink.lock().unwrap().push(pair));

        right.push(9);
        settle().await;
        assert!(seen.lock().unwrap().is_empty());

        left.push(1);
        settle().await;
        assert_eq!(*seen.lock().unwrap(), vec![(1, 9)]);
    }

    #[tokio::test]
    async fn test_zip_forwards_errors_past_the_buffers() {
        let left: EventStream<u32> = EventStream::new();
        let right: EventStream<u32> = EventStream::new();
        let errors = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&errors);
        left.zip(&right).subscribe(Subscriber::error(move |e| {
            sink.lock().unwrap().push(e.clone())
        }));

        // Nothing buffered on either side; the error still goes through,
        // synchronously.
        left.throw_error(StreamError::message("left broke"));
        right.throw_error(StreamError::message("right broke"));

        assert_eq!(
            *errors.lock().unwrap(),
            vec![
                StreamError::message("left broke"),
                StreamError::message("right broke"),
            ]
        );
    }

    #[tokio::test]
    async fn test_zip_construction_pushes_nothing() {
        let left: EventStream<u32> = EventStream::new();
        let right: EventStream<u32> = EventStream::new();
        let seen = Arc::new(Mutex::new(Vec::<(u32, u32)>::new()));

        let sink = Arc::clone(&seen);
        left.zip(&right)
            .on_value(move |pair| sink.lock().unwrap().push(pair));

        settle().await;
        assert!(seen.lock().unwrap().is_empty());
    }
}
