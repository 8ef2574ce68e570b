//! Live speed tracking: top speed with peak hold, rolling average, trend and
//! graph history.
//!
//! Intervals are counted in samples rather than wall-clock time. The location
//! stream delivers fixes at a roughly constant rate (typically 1-10 Hz), so a
//! sample count is a stable proxy for time and keeps the state `no_std`.

use crate::config::{
    AVG_BUFFER_SIZE,
    AVG_SAMPLE_INTERVAL,
    GRAPH_HISTORY_SIZE,
    GRAPH_SAMPLE_INTERVAL,
    PEAK_HOLD_SAMPLES,
    TREND_HISTORY_SIZE,
    TREND_WINDOW,
};
use crate::thresholds::TREND_THRESHOLD_MPS;

/// Direction the speed is heading.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Trend {
    /// Recent samples are faster than older ones.
    Rising,
    /// Recent samples are slower than older ones.
    Falling,
    /// Difference below `TREND_THRESHOLD_MPS`.
    Steady,
}

/// Tracks speed history for the speedometer screen.
pub struct SpeedState {
    /// Latest speed (m/s).
    current: f32,

    /// Highest speed since the last reset (m/s).
    max: f32,
    /// Samples left until the peak highlight clears.
    peak_hold: u32,
    /// True for `PEAK_HOLD_SAMPLES` samples after a new top speed.
    is_new_peak: bool,

    // Trend State
    history: [f32; TREND_HISTORY_SIZE],
    history_index: usize,
    history_count: usize,

    // Rolling Average State
    avg_buffer: [f32; AVG_BUFFER_SIZE],
    avg_index: usize,
    avg_count: usize,
    avg_sum: f32,
    avg_sample_counter: u32,

    // Graph History State
    graph_buffer: [f32; GRAPH_HISTORY_SIZE],
    graph_index: usize,
    graph_count: usize,
    graph_sample_counter: u32,
    graph_min: f32,
    graph_max: f32,
}

impl SpeedState {
    /// Create an empty state.
    pub const fn new() -> Self {
        Self {
            current: 0.0,
            max: 0.0,
            peak_hold: 0,
            is_new_peak: false,
            history: [0.0; TREND_HISTORY_SIZE],
            history_index: 0,
            history_count: 0,
            avg_buffer: [0.0; AVG_BUFFER_SIZE],
            avg_index: 0,
            avg_count: 0,
            avg_sum: 0.0,
            avg_sample_counter: 0,
            graph_buffer: [0.0; GRAPH_HISTORY_SIZE],
            graph_index: 0,
            graph_count: 0,
            graph_sample_counter: 0,
            graph_min: f32::MAX,
            graph_max: f32::MIN,
        }
    }

    /// Record a new speed reading (m/s).
    pub fn update(
        &mut self,
        speed_mps: f32,
    ) {
        self.current = speed_mps;

        self.history[self.history_index] = speed_mps;
        self.history_index = (self.history_index + 1) % TREND_HISTORY_SIZE;
        if self.history_count < TREND_HISTORY_SIZE {
            self.history_count += 1;
        }

        // Peak hold: highlight a new top speed for a few samples
        if speed_mps > self.max {
            self.max = speed_mps;
            self.peak_hold = PEAK_HOLD_SAMPLES;
            self.is_new_peak = true;
        } else if self.peak_hold > 0 {
            self.peak_hold -= 1;
            if self.peak_hold == 0 {
                self.is_new_peak = false;
            }
        }

        self.avg_sample_counter += 1;
        if self.avg_sample_counter >= AVG_SAMPLE_INTERVAL {
            self.avg_sample_counter = 0;
            self.add_avg_sample(speed_mps);
        }

        self.graph_sample_counter += 1;
        if self.graph_sample_counter >= GRAPH_SAMPLE_INTERVAL {
            self.graph_sample_counter = 0;
            self.add_graph_sample(speed_mps);
        }
    }

    /// Latest speed (m/s).
    #[inline]
    pub const fn current(&self) -> f32 { self.current }

    /// Top speed since the last reset (m/s).
    #[inline]
    pub const fn max(&self) -> f32 { self.max }

    /// True while a freshly set top speed should be highlighted.
    #[inline]
    pub const fn is_new_peak(&self) -> bool { self.is_new_peak }

    fn add_avg_sample(
        &mut self,
        value: f32,
    ) {
        if self.avg_count >= AVG_BUFFER_SIZE {
            self.avg_sum -= self.avg_buffer[self.avg_index];
        } else {
            self.avg_count += 1;
        }

        self.avg_buffer[self.avg_index] = value;
        self.avg_sum += value;
        self.avg_index = (self.avg_index + 1) % AVG_BUFFER_SIZE;
    }

    /// Rolling average speed, `None` until the first average sample.
    pub fn average(&self) -> Option<f32> {
        if self.avg_count == 0 {
            None
        } else {
            Some(self.avg_sum / self.avg_count as f32)
        }
    }

    fn add_graph_sample(
        &mut self,
        value: f32,
    ) {
        self.graph_buffer[self.graph_index] = value;
        self.graph_index = (self.graph_index + 1) % GRAPH_HISTORY_SIZE;

        if self.graph_count < GRAPH_HISTORY_SIZE {
            self.graph_count += 1;
        }

        self.recalculate_graph_minmax();
    }

    fn recalculate_graph_minmax(&mut self) {
        let (min, max) = self.graph_buffer[..self.graph_count]
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), &v| (min.min(v), max.max(v)));
        self.graph_min = min;
        self.graph_max = max;
    }

    /// Number of points currently in the graph.
    #[inline]
    pub const fn graph_len(&self) -> usize { self.graph_count }

    /// Graph points, oldest first.
    pub fn graph_points(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.graph_count < GRAPH_HISTORY_SIZE {
            0
        } else {
            self.graph_index
        };
        (0..self.graph_count).map(move |i| self.graph_buffer[(start + i) % GRAPH_HISTORY_SIZE])
    }

    /// `(min, max)` of the graph points, `None` while the graph is empty.
    pub fn graph_range(&self) -> Option<(f32, f32)> {
        if self.graph_count == 0 {
            None
        } else {
            Some((self.graph_min, self.graph_max))
        }
    }

    /// Compare the newest `TREND_WINDOW` samples against the oldest ones.
    ///
    /// `None` until the trend window has filled up.
    pub fn trend(&self) -> Option<Trend> {
        if self.history_count < TREND_HISTORY_SIZE {
            return None;
        }

        let mut recent_sum = 0.0f32;
        for i in 0..TREND_WINDOW {
            let idx = (self.history_index + TREND_HISTORY_SIZE - 1 - i) % TREND_HISTORY_SIZE;
            recent_sum += self.history[idx];
        }

        // Buffer is full, so the oldest sample sits at the write index
        let mut older_sum = 0.0f32;
        for i in 0..TREND_WINDOW {
            older_sum += self.history[(self.history_index + i) % TREND_HISTORY_SIZE];
        }

        let diff = (recent_sum - older_sum) / TREND_WINDOW as f32;
        if libm::fabsf(diff) < TREND_THRESHOLD_MPS {
            Some(Trend::Steady)
        } else if diff > 0.0 {
            Some(Trend::Rising)
        } else {
            Some(Trend::Falling)
        }
    }

    /// Reset the top speed to the current speed.
    pub fn reset_max(&mut self) {
        self.max = self.current;
        self.is_new_peak = false;
        self.peak_hold = 0;
    }

    /// Reset the rolling average buffer.
    pub fn reset_average(&mut self) {
        self.avg_buffer = [0.0; AVG_BUFFER_SIZE];
        self.avg_index = 0;
        self.avg_count = 0;
        self.avg_sum = 0.0;
        self.avg_sample_counter = 0;
    }

    /// Reset the graph history buffer.
    pub fn reset_graph(&mut self) {
        self.graph_buffer = [0.0; GRAPH_HISTORY_SIZE];
        self.graph_index = 0;
        self.graph_count = 0;
        self.graph_sample_counter = 0;
        self.graph_min = f32::MAX;
        self.graph_max = f32::MIN;
    }

    /// Reset everything, including the current speed.
    pub fn reset(&mut self) { *self = Self::new(); }
}

impl Default for SpeedState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = SpeedState::new();
        assert_eq!(state.current(), 0.0);
        assert_eq!(state.max(), 0.0);
        assert!(!state.is_new_peak());
        assert!(state.average().is_none());
        assert!(state.trend().is_none());
        assert!(state.graph_range().is_none());
    }

    #[test]
    fn test_default_impl() {
        let state = SpeedState::default();
        assert_eq!(state.history_count, 0);
    }

    #[test]
    fn test_max_tracks_highest_speed() {
        let mut state = SpeedState::new();
        state.update(10.0);
        state.update(25.0);
        state.update(15.0);
        assert_eq!(state.current(), 15.0);
        assert_eq!(state.max(), 25.0);
    }

    #[test]
    fn test_peak_hold_decay() {
        let mut state = SpeedState::new();
        state.update(30.0); // New top speed
        assert!(state.is_new_peak());

        for _ in 0..PEAK_HOLD_SAMPLES {
            state.update(20.0);
        }

        assert!(!state.is_new_peak());
        assert_eq!(state.peak_hold, 0);
    }

    #[test]
    fn test_reset_max() {
        let mut state = SpeedState::new();
        state.update(30.0);
        state.update(12.0);
        state.reset_max();
        assert_eq!(state.max(), 12.0);
        assert!(!state.is_new_peak());
    }

    #[test]
    fn test_rolling_average() {
        let mut state = SpeedState::new();
        for _ in 0..AVG_SAMPLE_INTERVAL {
            state.update(10.0);
        }
        for _ in 0..AVG_SAMPLE_INTERVAL {
            state.update(20.0);
        }
        let avg = state.average().unwrap();
        assert!((avg - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_reset_average() {
        let mut state = SpeedState::new();
        for _ in 0..AVG_SAMPLE_INTERVAL {
            state.update(10.0);
        }
        assert!(state.average().is_some());

        state.reset_average();
        assert!(state.average().is_none());
        assert_eq!(state.avg_sum, 0.0);
    }

    #[test]
    fn test_graph_sampling() {
        let mut state = SpeedState::new();
        state.graph_sample_counter = GRAPH_SAMPLE_INTERVAL - 1;
        state.update(5.0);
        state.graph_sample_counter = GRAPH_SAMPLE_INTERVAL - 1;
        state.update(9.0);

        assert_eq!(state.graph_len(), 2);
        assert_eq!(state.graph_range(), Some((5.0, 9.0)));
        let points: Vec<f32> = state.graph_points().collect();
        assert_eq!(points, vec![5.0, 9.0]);
    }

    #[test]
    fn test_graph_wraps_oldest_first() {
        let mut state = SpeedState::new();
        let samples = (GRAPH_HISTORY_SIZE + 3) as u32 * GRAPH_SAMPLE_INTERVAL;
        for i in 0..samples {
            state.update(i as f32);
        }
        assert_eq!(state.graph_len(), GRAPH_HISTORY_SIZE);
        let points: Vec<f32> = state.graph_points().collect();
        assert!(points.windows(2).all(|w| w[0] < w[1]), "graph should be oldest first");
    }

    #[test]
    fn test_reset_graph() {
        let mut state = SpeedState::new();
        state.graph_sample_counter = GRAPH_SAMPLE_INTERVAL - 1;
        state.update(5.0);

        state.reset_graph();
        assert_eq!(state.graph_len(), 0);
        assert!(state.graph_range().is_none());
    }

    #[test]
    fn test_trend_requires_full_window() {
        let mut state = SpeedState::new();
        for _ in 0..TREND_HISTORY_SIZE - 1 {
            state.update(10.0);
        }
        assert!(state.trend().is_none());

        state.update(10.0);
        assert_eq!(state.trend(), Some(Trend::Steady));
    }

    #[test]
    fn test_trend_rising() {
        let mut state = SpeedState::new();
        for i in 0..TREND_HISTORY_SIZE {
            state.update(i as f32);
        }
        assert_eq!(state.trend(), Some(Trend::Rising));
    }

    #[test]
    fn test_trend_falling() {
        let mut state = SpeedState::new();
        for i in 0..TREND_HISTORY_SIZE * 2 {
            state.update((TREND_HISTORY_SIZE * 2 - i) as f32);
        }
        assert_eq!(state.trend(), Some(Trend::Falling));
    }

    #[test]
    fn test_reset() {
        let mut state = SpeedState::new();
        for i in 0..TREND_HISTORY_SIZE {
            state.update(i as f32);
        }
        state.reset();
        assert_eq!(state.max(), 0.0);
        assert!(state.trend().is_none());
        assert!(state.average().is_none());
    }
}
