//! Acceleration timer (0-60 mph, 0-100 km/h, 80-120 km/h, ...).
//!
//! The timer is a small state machine driven by filtered speed samples:
//!
//! ```text
//!   arm()          speed crosses start     speed reaches target
//! Idle ───► Armed ─────────────────► Running ────────────────────► Finished
//!             ▲                         │
//!             └──── speed drops back ───┘ (Aborted)
//! ```
//!
//! Samples arrive at 1-10 Hz, far too coarse for a stopwatch, so both the
//! start and the finish instants are linearly interpolated between the two
//! samples that straddle the threshold.

use crate::gps::SpeedSample;
use crate::thresholds::{
    EIGHTY_KMH_MPS,
    HUNDRED_KMH_MPS,
    HUNDRED_TWENTY_KMH_MPS,
    MAX_RUN_MS,
    SIXTY_MPH_MPS,
    STANDSTILL_MPS,
    TWO_HUNDRED_KMH_MPS,
};

// =============================================================================
// Presets
// =============================================================================

/// Start/target speed pair of an acceleration run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub enum AccelPreset {
    /// 0 to 60 mph from a standstill.
    ZeroToSixtyMph,
    /// 0 to 100 km/h from a standstill.
    #[default]
    ZeroToHundredKmh,
    /// 0 to 200 km/h from a standstill.
    ZeroToTwoHundredKmh,
    /// 80 to 120 km/h rolling (overtaking).
    EightyToHundredTwentyKmh,
    /// 100 to 200 km/h rolling.
    HundredToTwoHundredKmh,
}

impl AccelPreset {
    /// All presets in menu order.
    pub const ALL: [Self; 5] = [
        Self::ZeroToSixtyMph,
        Self::ZeroToHundredKmh,
        Self::ZeroToTwoHundredKmh,
        Self::EightyToHundredTwentyKmh,
        Self::HundredToTwoHundredKmh,
    ];

    /// Speed the run starts from (m/s). Zero for standing starts.
    pub const fn start_mps(self) -> f32 {
        match self {
            Self::ZeroToSixtyMph | Self::ZeroToHundredKmh | Self::ZeroToTwoHundredKmh => 0.0,
            Self::EightyToHundredTwentyKmh => EIGHTY_KMH_MPS,
            Self::HundredToTwoHundredKmh => HUNDRED_KMH_MPS,
        }
    }

    /// Speed that ends the run (m/s).
    pub const fn target_mps(self) -> f32 {
        match self {
            Self::ZeroToSixtyMph => SIXTY_MPH_MPS,
            Self::ZeroToHundredKmh => HUNDRED_KMH_MPS,
            Self::ZeroToTwoHundredKmh | Self::HundredToTwoHundredKmh => TWO_HUNDRED_KMH_MPS,
            Self::EightyToHundredTwentyKmh => HUNDRED_TWENTY_KMH_MPS,
        }
    }

    /// True if the run starts from a standstill.
    #[inline]
    pub const fn is_standing_start(self) -> bool {
        matches!(self, Self::ZeroToSixtyMph | Self::ZeroToHundredKmh | Self::ZeroToTwoHundredKmh)
    }

    /// Speed that must be crossed upwards to start the clock (m/s).
    /// Standing starts use the standstill threshold so GPS jitter does not
    /// trigger a run.
    const fn start_threshold(self) -> f32 {
        if self.is_standing_start() {
            STANDSTILL_MPS
        } else {
            self.start_mps()
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ZeroToSixtyMph => "0-60 mph",
            Self::ZeroToHundredKmh => "0-100 km/h",
            Self::ZeroToTwoHundredKmh => "0-200 km/h",
            Self::EightyToHundredTwentyKmh => "80-120 km/h",
            Self::HundredToTwoHundredKmh => "100-200 km/h",
        }
    }
}

// =============================================================================
// Results, States, Events
// =============================================================================

/// A completed run.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AccelResult {
    /// Preset the run was timed against.
    pub preset: AccelPreset,
    /// Interpolated start-to-target time (ms).
    pub elapsed_ms: u64,
    /// Interpolated instant the clock started (stream timestamp, ms).
    pub start_timestamp_ms: u64,
    /// Highest sampled speed during the run (m/s).
    pub peak_speed_mps: f32,
}

/// Current state of the timer.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum TimerState {
    /// Not timing anything.
    #[default]
    Idle,
    /// Waiting for the start condition. `ready` becomes true once a sample
    /// below the start threshold has been seen.
    Armed {
        /// Vehicle has been below the start threshold since arming.
        ready: bool,
    },
    /// Clock running since `start_ms`.
    Running {
        /// Interpolated start instant (ms).
        start_ms: u64,
    },
    /// Target reached.
    Finished(AccelResult),
}

/// Transition reported by [`AccelTimer::update`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum TimerEvent {
    /// The clock started at the given instant (ms).
    Started {
        /// Interpolated start instant (ms).
        start_ms: u64,
    },
    /// The target speed was reached.
    Finished(AccelResult),
    /// Speed fell back below the start threshold; the timer re-armed.
    Aborted,
    /// The run exceeded `MAX_RUN_MS`; the timer went idle.
    TimedOut,
}

// =============================================================================
// Timer
// =============================================================================

/// Time at which speed crossed `threshold` between two samples.
fn crossing_time(
    prev: &SpeedSample,
    next: &SpeedSample,
    threshold: f32,
) -> u64 {
    let rise = next.speed_mps - prev.speed_mps;
    if rise <= 0.0 {
        return next.timestamp_ms;
    }
    let fraction = ((threshold - prev.speed_mps) / rise).clamp(0.0, 1.0);
    let span = next.timestamp_ms.saturating_sub(prev.timestamp_ms) as f32;
    prev.timestamp_ms + libm::roundf(span * fraction) as u64
}

/// Stopwatch for acceleration runs.
#[derive(Clone, Debug, Default)]
pub struct AccelTimer {
    state: TimerState,
    preset: AccelPreset,
    last: Option<SpeedSample>,
    peak_speed: f32,
}

impl AccelTimer {
    /// Create an idle timer.
    pub const fn new() -> Self {
        Self {
            state: TimerState::Idle,
            preset: AccelPreset::ZeroToHundredKmh,
            last: None,
            peak_speed: 0.0,
        }
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> TimerState { self.state }

    /// Preset of the current or last run.
    #[inline]
    pub const fn preset(&self) -> AccelPreset { self.preset }

    /// Result of the last run, if it finished.
    pub const fn result(&self) -> Option<AccelResult> {
        match self.state {
            TimerState::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// Arm the timer for `preset`, discarding any run in progress.
    ///
    /// If the last known speed is already below the start threshold the
    /// timer is immediately ready to start.
    pub fn arm(
        &mut self,
        preset: AccelPreset,
    ) {
        self.preset = preset;
        self.peak_speed = 0.0;
        let ready = self
            .last
            .is_some_and(|last| last.speed_mps < preset.start_threshold());
        self.state = TimerState::Armed { ready };
        log::info!("timer: armed for {} (ready: {})", preset.label(), ready);
    }

    /// Stop timing and go idle.
    pub fn cancel(&mut self) {
        if self.state != TimerState::Idle {
            log::info!("timer: cancelled");
        }
        self.state = TimerState::Idle;
        self.peak_speed = 0.0;
    }

    /// Stopwatch value at `now_ms`: live while running, final once finished.
    pub fn elapsed_ms(
        &self,
        now_ms: u64,
    ) -> u64 {
        match self.state {
            TimerState::Running { start_ms } => now_ms.saturating_sub(start_ms),
            TimerState::Finished(result) => result.elapsed_ms,
            TimerState::Idle | TimerState::Armed { .. } => 0,
        }
    }

    /// Feed the next speed sample.
    pub fn update(
        &mut self,
        sample: SpeedSample,
    ) -> Option<TimerEvent> {
        let prev = self.last.replace(sample);
        let threshold = self.preset.start_threshold();

        match self.state {
            TimerState::Idle | TimerState::Finished(_) => None,
            TimerState::Armed { ready } => {
                if sample.speed_mps < threshold {
                    if !ready {
                        log::debug!("timer: ready for {}", self.preset.label());
                    }
                    self.state = TimerState::Armed { ready: true };
                    return None;
                }
                // Moving when armed: the vehicle has to slow down first
                let prev = prev.filter(|_| ready)?;

                let start_ms = crossing_time(&prev, &sample, threshold);
                self.peak_speed = sample.speed_mps;
                self.state = TimerState::Running { start_ms };
                log::info!("timer: started {} at {} ms", self.preset.label(), start_ms);

                // A single coarse sample can jump over both thresholds
                if let Some(event) = self.try_finish(&prev, &sample, start_ms) {
                    return Some(event);
                }
                Some(TimerEvent::Started { start_ms })
            }
            TimerState::Running { start_ms } => {
                self.peak_speed = self.peak_speed.max(sample.speed_mps);
                let prev = prev.unwrap_or(sample);

                if let Some(event) = self.try_finish(&prev, &sample, start_ms) {
                    return Some(event);
                }

                if sample.speed_mps < threshold {
                    self.state = TimerState::Armed { ready: true };
                    self.peak_speed = 0.0;
                    log::warn!("timer: {} aborted, speed dropped", self.preset.label());
                    return Some(TimerEvent::Aborted);
                }

                if sample.timestamp_ms.saturating_sub(start_ms) > MAX_RUN_MS {
                    return Some(self.time_out());
                }

                None
            }
        }
    }

    fn time_out(&mut self) -> TimerEvent {
        self.state = TimerState::Idle;
        self.peak_speed = 0.0;
        log::warn!("timer: {} timed out", self.preset.label());
        TimerEvent::TimedOut
    }

    /// Finish the run if `sample` reached the target. A crossing later than
    /// `MAX_RUN_MS` after the start (e.g. after a gap in fixes) times out.

    fn try_finish(
        &mut self,
        prev: &SpeedSample,
        sample: &SpeedSample,
        start_ms: u64,
    ) -> Option<TimerEvent> {
        let target = self.preset.target_mps();
        if sample.speed_mps < target {
            return None;
        }

        let finish_ms = crossing_time(prev, sample, target).max(start_ms);
        if finish_ms - start_ms > MAX_RUN_MS {
            return Some(self.time_out());
        }
        let result = AccelResult {
            preset: self.preset,
            elapsed_ms: finish_ms - start_ms,
            start_timestamp_ms: start_ms,
            peak_speed_mps: self.peak_speed,
        };
        self.state = TimerState::Finished(result);
        log::info!("timer: {} finished in {} ms", self.preset.label(), result.elapsed_ms);
        Some(TimerEvent::Finished(result))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
