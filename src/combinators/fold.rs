//! # fold: accumulate values and emit each intermediate result.
//!
//! ```text
//! -----1-------2-------3---------
//!      |       |       |
//!     (acc, x) => acc + x
//!      v       v       v
//! -----1-------3-------6---------
//! ```
//!
//! The accumulator state is an explicit `Option`: "no value yet" is a
//! distinct state, never inferred from the accumulated value itself. An
//! accumulated zero, empty string or `false` therefore does not re-seed the
//! fold, and an explicitly supplied zero initial still seeds it.

use std::sync::{Arc, Mutex, PoisonError};

use crate::combinators::catch_handler;
use crate::error::StreamError;
use crate::observers::Subscriber;
use crate::streams::EventStream;

impl<T: Clone + Send + 'static> EventStream<T> {
    /// Derives a running-accumulation stream without an initial value.
    ///
    /// The first delivered value becomes the accumulator verbatim (`f` is not
    /// applied to it); every subsequent value updates it via
    /// `f(accumulator, value)`. Each update is pushed downstream.
    ///
    /// Errors from the source are forwarded and leave the accumulator
    /// untouched, as does a panic inside `f` (which is pushed downstream as
    /// [`StreamError::HandlerPanic`]).
    pub fn fold<F>(&self, f: F) -> EventStream<T>
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        self.fold_seeded(None, f)
    }

    /// Derives a running-accumulation stream seeded with `initial`.
    ///
    /// Unlike [`fold`](EventStream::fold), every delivered value — including
    /// the first — updates the accumulator via `f`.
    pub fn fold_with<F>(&self, initial: T, f: F) -> EventStream<T>
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        self.fold_seeded(Some(initial), f)
    }

    /// Shared implementation: `seed` is the explicit "has a value" tag.
    fn fold_seeded<F>(&self, seed: Option<T>, f: F) -> EventStream<T>
    where
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        let out = EventStream::with_config(self.config().clone());
        // Accumulator private to this fold invocation, not shared with the
        // source stream.
        let acc: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(seed));

        let values = out.clone();
        let errors = out.clone();
        self.subscribe(
            Subscriber::value(move |v: T| {
                let mut slot = acc.lock().unwrap_or_else(PoisonError::into_inner);
                let updated = match slot.clone() {
                    None => Ok(v),
                    Some(prev) => catch_handler(|| f(prev, v)),
                };
                match updated {
                    Ok(next) => {
                        *slot = Some(next.clone());
                        drop(slot);
                        values.push(next);
                    }
                    Err(panic) => {
                        // Accumulator keeps its previous value.
                        drop(slot);
                        values.throw_error(panic);
                    }
                }
            })
            .with_error(move |e: &StreamError| errors.throw_error(e.clone())),
        );

        out
    }
}
