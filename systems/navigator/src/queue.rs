//! Priority queue that breaks cost ties randomly.
//!
//! Entries are bucketed by their cost quantized to a thousandth, so costs
//! that differ only by floating-point noise land in the same bucket. Pops
//! always take the cheapest bucket and pick a uniformly random entry from
//! it, which keeps the online walk from committing to one habit when
//! several moves score the same.

use std::collections::BTreeMap;

use rand::Rng;

const QUANTUM: f64 = 1000.0;

/// Min-queue over `(cost, value)` pairs with randomized tie-breaking.
#[derive(Clone, Debug)]
pub struct TieBreakingBucketQueue<T> {
    buckets: BTreeMap<i64, Vec<T>>,
    len: usize,
}

impl<T> Default for TieBreakingBucketQueue<T> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<T> TieBreakingBucketQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under the bucket of `cost`.
    pub fn push(&mut self, cost: f64, value: T) {
        self.buckets.entry(quantize(cost)).or_default().push(value);
        self.len += 1;
    }

    /// Removes and returns one entry from the cheapest bucket, chosen
    /// uniformly at random within it.
    pub fn pop<R: Rng>(&mut self, rng: &mut R) -> Option<T> {
        let (&key, bucket) = self.buckets.iter_mut().next()?;
        let picked = bucket.swap_remove(rng.gen_range(0..bucket.len()));
        if bucket.is_empty() {
            let _ = self.buckets.remove(&key);
        }
        self.len -= 1;
        Some(picked)
    }

    /// Number of queued entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn quantize(cost: f64) -> i64 {
    (cost * QUANTUM).round() as i64
}
