//! In-memory history of finished acceleration runs.
//!
//! Keeps the last `HISTORY_CAPACITY` results. When full, the oldest result
//! is dropped. Persisting the history is left to the host application.

use heapless::Deque;

use crate::accel_timer::{AccelPreset, AccelResult};
use crate::config::HISTORY_CAPACITY;

/// Ring buffer of acceleration results.
pub struct ResultHistory {
    results: Deque<AccelResult, HISTORY_CAPACITY>,
}

impl ResultHistory {
    /// Create an empty history.
    pub const fn new() -> Self { Self { results: Deque::new() } }

    /// Record a result. If the history is full, the oldest result is dropped.
    pub fn record(
        &mut self,
        result: AccelResult,
    ) {
        if self.results.is_full() {
            self.results.pop_front();
        }
        self.results.push_back(result).ok();
    }

    /// Iterate over results, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &AccelResult> { self.results.iter().rev() }

    /// Most recent result.
    #[inline]
    pub fn latest(&self) -> Option<&AccelResult> { self.results.back() }

    /// Fastest result recorded for `preset`.
    pub fn best(
        &self,
        preset: AccelPreset,
    ) -> Option<&AccelResult> {
        self.results
            .iter()
            .filter(|r| r.preset == preset)
            .min_by_key(|r| r.elapsed_ms)
    }

    /// Number of results recorded for `preset`.
    pub fn count(
        &self,
        preset: AccelPreset,
    ) -> usize {
        self.results.iter().filter(|r| r.preset == preset).count()
    }

    /// Number of results in the history.
    #[inline]
    pub fn len(&self) -> usize { self.results.len() }

    /// Check if the history is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.results.is_empty() }

    /// Remove all results.
    pub fn clear(&mut self) { self.results.clear(); }
}

impl Default for ResultHistory {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn result(
        preset: AccelPreset,
        elapsed_ms: u64,
    ) -> AccelResult {
        AccelResult {
            preset,
            elapsed_ms,
            start_timestamp_ms: 0,
            peak_speed_mps: 30.0,
        }
    }

    #[test]
    fn test_record_and_latest() {
        let mut history = ResultHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());

        history.record(result(AccelPreset::ZeroToHundredKmh, 6200));
        history.record(result(AccelPreset::ZeroToSixtyMph, 5900));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().elapsed_ms, 5900);
    }

    #[test]
    fn test_iter_newest_first() {
        let mut history = ResultHistory::new();
        for ms in [7000, 6500, 6800] {
            history.record(result(AccelPreset::ZeroToHundredKmh, ms));
        }
        let order: Vec<u64> = history.iter().map(|r| r.elapsed_ms).collect();
        assert_eq!(order, vec![6800, 6500, 7000]);
    }

    #[test]
    fn test_best_per_preset() {
        let mut history = ResultHistory::new();
        history.record(result(AccelPreset::ZeroToHundredKmh, 7000));
        history.record(result(AccelPreset::ZeroToSixtyMph, 5000));
        history.record(result(AccelPreset::ZeroToHundredKmh, 6400));
        history.record(result(AccelPreset::ZeroToHundredKmh, 6900));

        assert_eq!(history.best(AccelPreset::ZeroToHundredKmh).unwrap().elapsed_ms, 6400);
        assert_eq!(history.best(AccelPreset::ZeroToSixtyMph).unwrap().elapsed_ms, 5000);
        assert!(history.best(AccelPreset::HundredToTwoHundredKmh).is_none());
        assert_eq!(history.count(AccelPreset::ZeroToHundredKmh), 3);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = ResultHistory::new();
        for i in 0..HISTORY_CAPACITY as u64 + 2 {
            history.record(result(AccelPreset::ZeroToHundredKmh, 1000 + i));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        // 1000 and 1001 were dropped
        assert_eq!(history.best(AccelPreset::ZeroToHundredKmh).unwrap().elapsed_ms, 1002);
        assert_eq!(history.latest().unwrap().elapsed_ms, 1001 + HISTORY_CAPACITY as u64);
    }

    #[test]
    fn test_clear() {
        let mut history = ResultHistory::new();
        history.record(result(AccelPreset::ZeroToHundredKmh, 6000));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.count(AccelPreset::ZeroToHundredKmh), 0);
    }
}
