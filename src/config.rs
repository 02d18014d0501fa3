//! # Global stream configuration.
//!
//! Provides [`Config`], centralized settings for observers and the streams
//! derived from them. Combinator-created streams inherit the configuration of
//! their source, so a whole stream graph is typically tuned once at the root.
//!
//! ## Sentinel values
//! - `queue_capacity = 0` → unbounded delivery queues (the default)
//! - `id_space` is clamped to a minimum of 1 by [`Config::id_space_clamped`]

/// Configuration for an [`Observer`](crate::Observer) and its delivery queues.
///
/// ## Field semantics
/// - `queue_capacity`: per-subscriber delivery queue size (`0` = unbounded)
/// - `id_space`: size of the range random subscription ids are drawn from
/// - `id_retries`: random draws attempted before the deterministic fallback
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of each subscriber's delivery queue.
    ///
    /// - `0` = unbounded (no value is ever dropped for a live subscriber)
    /// - `n > 0` = bounded; when the queue is full, new values for that
    ///   subscriber are dropped (fire-and-forget discipline)
    pub queue_capacity: usize,

    /// Size of the range random subscription ids are drawn from.
    ///
    /// Small spaces make collisions likely; collisions are retried and never
    /// surfaced. Minimum effective value is 1.
    pub id_space: u64,

    /// Number of random id draws before falling back to a deterministic
    /// free id. Bounds the retry loop under adversarial collision rates.
    pub id_retries: u32,
}

impl Config {
    /// Returns the per-subscriber queue capacity as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → bounded at `n` (minimum 1)
    #[inline]
    pub fn queue_capacity_limit(&self) -> Option<usize> {
        match self.queue_capacity {
            0 => None,
            n => Some(n.max(1)),
        }
    }

    /// Returns the id space clamped to a minimum of 1.
    #[inline]
    pub fn id_space_clamped(&self) -> u64 {
        self.id_space.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `queue_capacity = 0` (unbounded, no dropped deliveries)
    /// - `id_space = 1024`
    /// - `id_retries = 8`
    fn default() -> Self {
        Self {
            queue_capacity: 0,
            id_space: 1024,
            id_retries: 8,
        }
    }
}
