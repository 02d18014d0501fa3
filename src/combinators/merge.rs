//! # merge: interleave two streams into one.
//!
//! ```text
//! ---1-----2------3------4----5--
//!    |     |      |      |    |
//! -----A-------B-------C---------
//!    | |   |   |  |    | |    |
//!    v v   v   v  v    v v    v
//! ---1-A---2---B--3----C-4----5--
//! ```
//!
//! Values and errors from either source are forwarded unchanged. Causal
//! order per source is preserved; interleaving across sources follows
//! whatever order deliveries actually occur in — a property of the
//! scheduler, not of the combinator.

use crate::error::StreamError;
use crate::observers::Subscriber;
use crate::streams::EventStream;

impl<T: Clone + Send + 'static> EventStream<T> {
    /// Derives a stream carrying every value and error from both sources.
    pub fn merge(&self, other: &EventStream<T>) -> EventStream<T> {
        let out = EventStream::with_config(self.config().clone());

        for source in [self, other] {
            let values = out.clone();
            let errors = out.clone();
            source.subscribe(
                Subscriber::value(move |v: T| {
                    values.push(v);
                })
                .with_error(move |e: &StreamError| errors.throw_error(e.clone())),
            );
        }

        out
    }
}
