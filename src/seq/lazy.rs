//! # Lazy memoized cons sequence.
//!
//! [`Seq`] is an immutable, potentially infinite cons list whose tails are
//! thunks, forced on first access and memoized so every node's tail is
//! computed at most once. A sequence is restartable from its definition —
//! walking it twice traverses the same (now memoized) nodes.
//!
//! ```
//! use evstream::seq::Seq;
//!
//! let evens = Seq::range_from(0).filter(|v| v % 2 == 0);
//! assert_eq!(evens.take(4).to_vec(), vec![0, 2, 4, 6]);
//! ```
//!
//! Unlike the stream side of this crate, sequences are pull-based and
//! single-threaded: nodes are `Rc`-shared and never cross threads.

use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A lazy cons sequence: empty, or a head plus a memoized tail thunk.
pub struct Seq<T> {
    node: Option<Rc<Node<T>>>,
}

struct Node<T> {
    head: T,
    tail: Tail<T>,
}

/// Delayed tail: evaluated on first force, memoized thereafter.
struct Tail<T> {
    memo: OnceCell<Seq<T>>,
    thunk: RefCell<Option<Box<dyn FnOnce() -> Seq<T>>>>,
}

impl<T> Tail<T> {
    fn force(&self) -> Seq<T> {
        if let Some(memo) = self.memo.get() {
            return memo.clone();
        }
        // Take the thunk out before running it so the RefCell borrow is
        // released; a re-entrant force then lands in the None arm.
        let thunk = self.thunk.borrow_mut().take();
        match thunk {
            Some(compute) => {
                let seq = compute();
                let _ = self.memo.set(seq.clone());
                seq
            }
            // A tail that re-enters its own thunk resolves as empty.
            None => self.memo.get().cloned().unwrap_or_else(Seq::empty),
        }
    }
}

impl<T> Seq<T> {
    /// The empty sequence.
    pub fn empty() -> Self {
        Seq { node: None }
    }

    /// Prepends `head` to the sequence produced by `tail` when forced.
    pub fn cons(head: T, tail: impl FnOnce() -> Seq<T> + 'static) -> Self {
        Seq {
            node: Some(Rc::new(Node {
                head,
                tail: Tail {
                    memo: OnceCell::new(),
                    thunk: RefCell::new(Some(Box::new(tail))),
                },
            })),
        }
    }

    /// Returns `true` for the empty sequence.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// Forces and returns the tail (memoizing it); empty for the empty
    /// sequence.
    pub fn tail(&self) -> Seq<T> {
        match &self.node {
            None => Seq::empty(),
            Some(node) => node.tail.force(),
        }
    }
}

impl<T: Clone + 'static> Seq<T> {
    /// Returns the first element, if any.
    pub fn head(&self) -> Option<T> {
        self.node.as_ref().map(|node| node.head.clone())
    }

    /// Returns the n-th element (0-indexed), forcing tails along the way.
    pub fn nth(&self, n: usize) -> Option<T> {
        let mut cur = self.clone();
        for _ in 0..n {
            cur = cur.tail();
        }
        cur.head()
    }

    /// Lazily applies `f` to every element.
    ///
    /// The head of each node is mapped when the node is constructed; tails
    /// stay unevaluated until forced, so mapping an infinite sequence is
    /// fine.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Seq<U> {
        self.map_shared(Rc::new(f))
    }

    fn map_shared<U: 'static>(&self, f: Rc<dyn Fn(T) -> U>) -> Seq<U> {
        match self.head() {
            None => Seq::empty(),
            Some(head) => {
                let rest = self.clone();
                let shared = Rc::clone(&f);
                Seq::cons(f(head), move || rest.tail().map_shared(shared))
            }
        }
    }

    /// Lazily keeps elements matching `pred`.
    ///
    /// Skipping non-matching elements is eager up to the first match; on an
    /// infinite sequence with no matching element this never returns.
    pub fn filter(&self, pred: impl Fn(&T) -> bool + 'static) -> Seq<T> {
        self.filter_shared(Rc::new(pred))
    }

    fn filter_shared(&self, pred: Rc<dyn Fn(&T) -> bool>) -> Seq<T> {
        let mut cur = self.clone();
        loop {
            let Some(head) = cur.head() else {
                return Seq::empty();
            };
            if pred(&head) {
                let rest = cur;
                let shared = Rc::clone(&pred);
                return Seq::cons(head, move || rest.tail().filter_shared(shared));
            }
            cur = cur.tail();
        }
    }

    /// Takes the first `n` elements (fewer if the sequence is shorter).
    pub fn take(&self, n: usize) -> Seq<T> {
        if n == 0 {
            return Seq::empty();
        }
        match self.head() {
            None => Seq::empty(),
            Some(head) => {
                let rest = self.clone();
                // An exhausted count must not force the source tail.
                Seq::cons(head, move || {
                    if n == 1 {
                        Seq::empty()
                    } else {
                        rest.tail().take(n - 1)
                    }
                })
            }
        }
    }

    /// Eagerly folds the whole sequence. Diverges on an infinite sequence.
    pub fn fold<A>(&self, initial: A, f: impl Fn(A, T) -> A) -> A {
        let mut acc = initial;
        let mut cur = self.clone();
        while let Some(head) = cur.head() {
            acc = f(acc, head);
            cur = cur.tail();
        }
        acc
    }

    /// Eagerly applies `f` to every element.
    pub fn for_each(&self, mut f: impl FnMut(T)) {
        let mut cur = self.clone();
        while let Some(head) = cur.head() {
            f(head);
            cur = cur.tail();
        }
    }

    /// Collects the whole sequence into a `Vec`. Diverges on an infinite
    /// sequence.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::new();
        self.for_each(|v| out.push(v));
        out
    }
}

impl Seq<i64> {
    /// The inclusive range `low..=high`; empty when `low > high`.
    pub fn range(low: i64, high: i64) -> Seq<i64> {
        if low > high {
            Seq::empty()
        } else {
            Seq::cons(low, move || Seq::range(low + 1, high))
        }
    }

    /// The infinite ascending sequence starting at `low`.
    pub fn range_from(low: i64) -> Seq<i64> {
        Seq::cons(low, move || Seq::range_from(low.wrapping_add(1)))
    }
}

impl<T> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Seq {
            node: self.node.clone(),
        }
    }
}

impl<T> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Seq(empty)")
        } else {
            f.write_str("Seq(..)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_range_is_inclusive() {
        assert_eq!(Seq::range(1, 5).to_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(Seq::range(3, 3).to_vec(), vec![3]);
    }

    #[test]
    fn test_range_is_empty_when_low_exceeds_high() {
        assert!(Seq::range(5, 1).is_empty());
        assert_eq!(Seq::range(5, 1).to_vec(), Vec::<i64>::new());
    }

    #[test]
    fn test_take_terminates_on_an_infinite_range() {
        assert_eq!(Seq::range_from(10).take(3).to_vec(), vec![10, 11, 12]);
    }

    #[test]
    fn test_take_past_the_end_stops_at_the_end() {
        assert_eq!(Seq::range(1, 2).take(10).to_vec(), vec![1, 2]);
        assert!(Seq::range(1, 2).take(0).is_empty());
    }

    #[test]
    fn test_tails_are_lazy_and_memoized() {
        let evaluations = Rc::new(Cell::new(0));

        let counter = Rc::clone(&evaluations);
        let seq = Seq::cons(1, move || {
            counter.set(counter.get() + 1);
            Seq::cons(2, Seq::empty)
        });

        // Nothing forced yet.
        assert_eq!(evaluations.get(), 0);

        assert_eq!(seq.tail().head(), Some(2));
        assert_eq!(seq.tail().head(), Some(2));
        // Forced twice, evaluated once.
        assert_eq!(evaluations.get(), 1);
    }

    #[test]
    fn test_map_is_lazy_past_the_head() {
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let mapped = Seq::range_from(1).map(move |v| {
            counter.set(counter.get() + 1);
            v * 10
        });

        // Constructing the mapped node applied f to the head only.
        assert_eq!(calls.get(), 1);

        assert_eq!(mapped.take(3).to_vec(), vec![10, 20, 30]);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_filter_skips_to_matching_elements() {
        let evens = Seq::range(1, 10).filter(|v| v % 2 == 0);
        assert_eq!(evens.take(2).to_vec(), vec![2, 4]);
        assert_eq!(evens.to_vec(), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_fold_accumulates_the_whole_sequence() {
        let total = Seq::range(1, 4).fold(0, |acc, v| acc + v);
        assert_eq!(total, 10);
    }

    #[test]
    fn test_nth_indexes_from_zero() {
        assert_eq!(Seq::range_from(0).nth(5), Some(5));
        assert_eq!(Seq::range(1, 3).nth(2), Some(3));
        assert_eq!(Seq::range(1, 3).nth(3), None);
    }

    #[test]
    fn test_sequences_are_restartable() {
        let seq = Seq::range(1, 4);
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
    }
}
