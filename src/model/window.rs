//! Bounded per-endpoint history of snapshots.

use super::Snapshot;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Number of samples retained per endpoint.
pub const DEFAULT_MAX_SAMPLES: usize = 3;

/// Smallest usable window: comparisons need two samples.
pub const MIN_MAX_SAMPLES: usize = 2;

/// Largest accepted window. Only the last two samples are ever compared.
pub const MAX_MAX_SAMPLES: usize = 1000;

/// One successful poll of a processor.
#[derive(Debug)]
pub struct Sample {
    pub taken_at: DateTime<Utc>,
    pub snapshot: Snapshot,
    /// xxh3 of the raw response body, 0 when unknown.
    pub content_hash: u64,
}

impl Sample {
    pub fn new(taken_at: DateTime<Utc>, snapshot: Snapshot, body: &[u8]) -> Self {
        Self {
            taken_at,
            snapshot,
            content_hash: xxhash_rust::xxh3::xxh3_64(body),
        }
    }

    /// A sample with no body hash, for snapshots not built from a response.
    pub fn unhashed(taken_at: DateTime<Utc>, snapshot: Snapshot) -> Self {
        Self {
            taken_at,
            snapshot,
            content_hash: 0,
        }
    }

    /// Whether both samples came from byte-identical response bodies.
    pub fn same_payload(&self, other: &Sample) -> bool {
        self.content_hash != 0 && self.content_hash == other.content_hash
    }
}

/// Sliding window of the most recent samples, oldest first.
///
/// Appending beyond capacity silently drops the oldest entries.
#[derive(Debug)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleWindow {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_SAMPLES)
    }

    /// Capacity is clamped to `MIN_MAX_SAMPLES..=MAX_MAX_SAMPLES`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(MIN_MAX_SAMPLES, MAX_MAX_SAMPLES);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Push to the tail, then keep only the last `capacity` entries.
    pub fn append(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// The two most recent samples as `(older, newer)`.
    pub fn latest_pair(&self) -> Option<(&Sample, &Sample)> {
        let len = self.samples.len();
        if len < 2 {
            return None;
        }
        Some((&self.samples[len - 2], &self.samples[len - 1]))
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(n: i64) -> Sample {
        Sample::new(
            DateTime::from_timestamp(n, 0).expect("valid timestamp"),
            Snapshot::from(json!({ "n": n })),
            n.to_string().as_bytes(),
        )
    }

    fn ids(window: &SampleWindow) -> Vec<i64> {
        window.iter().map(|s| s.taken_at.timestamp()).collect()
    }

    #[test]
    fn test_window_keeps_last_three_in_order() {
        let mut window = SampleWindow::new();
        for n in 1..=5 {
            window.append(sample(n));
            assert!(window.len() <= DEFAULT_MAX_SAMPLES);
        }
        assert_eq!(ids(&window), vec![3, 4, 5]);
    }

    #[test]
    fn test_latest_pair_requires_two_samples() {
        let mut window = SampleWindow::new();
        assert!(window.latest_pair().is_none());
        window.append(sample(1));
        assert!(window.latest_pair().is_none());
        window.append(sample(2));
        let (older, newer) = window.latest_pair().expect("two samples");
        assert_eq!(older.taken_at.timestamp(), 1);
        assert_eq!(newer.taken_at.timestamp(), 2);
    }

    #[test]
    fn test_latest_pair_after_eviction() {
        let mut window = SampleWindow::new();
        for n in 1..=4 {
            window.append(sample(n));
        }
        let (older, newer) = window.latest_pair().expect("two samples");
        assert_eq!((older.taken_at.timestamp(), newer.taken_at.timestamp()), (3, 4));
        assert_eq!(window.latest().map(|s| s.taken_at.timestamp()), Some(4));
    }

    #[test]
    fn test_capacity_is_clamped() {
        assert_eq!(SampleWindow::with_capacity(0).capacity(), MIN_MAX_SAMPLES);
        assert_eq!(SampleWindow::with_capacity(5).capacity(), 5);
    }

    #[test]
    fn test_oversized_capacity_does_not_preallocate() {
        assert_eq!(SampleWindow::with_capacity(usize::MAX).capacity(), MAX_MAX_SAMPLES);

        let mut window = SampleWindow::with_capacity(usize::MAX);
        window.append(sample(1));
        window.append(sample(2));
        assert_eq!(ids(&window), vec![1, 2]);
    }

    #[test]
    fn test_same_payload() {
        let now = Utc::now();
        let a = Sample::new(now, Snapshot::empty_map(), b"{}");
        let b = Sample::new(now, Snapshot::empty_map(), b"{}");
        let c = Sample::new(now, Snapshot::empty_map(), b"{ }");
        assert!(a.same_payload(&b));
        assert!(!a.same_payload(&c));

        let unhashed = Sample::unhashed(now, Snapshot::empty_map());
        assert!(!unhashed.same_payload(&Sample::unhashed(now, Snapshot::empty_map())));
    }
}
