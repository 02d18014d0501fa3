//! Pull-based lazy sequences.
//!
//! A small companion to the push-based streams: [`Seq`] is a memoized,
//! potentially infinite cons list with `range`/`map`/`filter`/`take` and
//! eager consumers (`fold`, `for_each`, `to_vec`).

mod lazy;

pub use lazy::Seq;
