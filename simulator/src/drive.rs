//! Synthetic drive: repeated launches from a standstill.
//!
//! Each run stops for [`STOP_DURATION`], accelerates towards the top speed,
//! cruises for [`CRUISE_DURATION`] and brakes back to zero. Fixes come at
//! [`FIX_INTERVAL`] with a little Doppler noise. Some fixes carry no speed
//! (the estimator derives it from position) and some have poor accuracy
//! (the estimator rejects them).

use speedo_common::GpsFix;

use crate::timing::{CRUISE_DURATION, FIX_INTERVAL, STOP_DURATION};

const START_LATITUDE: f64 = 52.52;
const START_LONGITUDE: f64 = 13.405;

/// Degrees of latitude per meter travelled north.
const DEG_PER_M: f64 = 1.0 / 111_195.0;

/// Acceleration from a standstill (m/s²). Falls off linearly towards top speed.
const LAUNCH_ACCEL: f32 = 6.0;
const BRAKE_DECEL: f32 = 8.0;

/// Launch ends at this fraction of top speed.
const CRUISE_FRACTION: f32 = 0.98;

/// Doppler speed noise amplitude (m/s).
const SPEED_NOISE: f32 = 0.15;

const GOOD_ACCURACY_M: f32 = 4.0;
const POOR_ACCURACY_M: f32 = 40.0;

/// Every Nth fix reports no speed.
const NO_SPEED_EVERY: u64 = 10;
/// Every Nth fix has poor accuracy.
const POOR_ACCURACY_EVERY: u64 = 37;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Stopped,
    Launch,
    Cruise,
    Braking,
}

/// Iterator of GPS fixes for a scripted drive.
pub struct SyntheticDrive {
    top_speed_mps: f32,
    runs_left: u32,
    phase: Phase,
    phase_ms: u64,
    timestamp_ms: u64,
    speed_mps: f32,
    latitude: f64,
    fixes: u64,
    done: bool,
}

impl SyntheticDrive {
    /// Drive `runs` launches towards `top_speed_mps`.
    ///
    /// # Panics
    ///
    /// Panics if `top_speed_mps` is not positive.
    pub fn new(
        runs: u32,
        top_speed_mps: f32,
    ) -> Self {
        assert!(top_speed_mps > 0.0, "top speed must be positive");
        Self {
            top_speed_mps,
            runs_left: runs,
            phase: Phase::Stopped,
            phase_ms: 0,
            timestamp_ms: 0,
            speed_mps: 0.0,
            latitude: START_LATITUDE,
            fixes: 0,
            done: false,
        }
    }

    fn enter(
        &mut self,
        phase: Phase,
    ) {
        log::trace!("drive: {:?} -> {:?} at {} ms", self.phase, phase, self.timestamp_ms);
        self.phase = phase;
        self.phase_ms = 0;
    }

    fn fix(&self) -> GpsFix {
        let t = self.timestamp_ms as f32 / 1000.0;
        let speed_mps = if self.fixes % NO_SPEED_EVERY == NO_SPEED_EVERY - 1 {
            None
        } else {
            Some((self.speed_mps + (t * 7.3).sin() * SPEED_NOISE).max(0.0))
        };
        let accuracy_m = if self.fixes % POOR_ACCURACY_EVERY == POOR_ACCURACY_EVERY - 1 {
            POOR_ACCURACY_M
        } else {
            GOOD_ACCURACY_M
        };

        GpsFix {
            timestamp_ms: self.timestamp_ms,
            latitude: self.latitude,
            longitude: START_LONGITUDE,
            speed_mps,
            accuracy_m,
        }
    }

    fn advance(&mut self) {
        let dt = FIX_INTERVAL.as_secs_f32();
        let dt_ms = FIX_INTERVAL.as_millis() as u64;
        self.phase_ms += dt_ms;

        match self.phase {
            Phase::Stopped => {
                if self.phase_ms >= STOP_DURATION.as_millis() as u64 {
                    if self.runs_left == 0 {
                        self.done = true;
                    } else {
                        self.runs_left -= 1;
                        self.enter(Phase::Launch);
                    }
                }
            }
            Phase::Launch => {
                let accel = LAUNCH_ACCEL * (1.0 - self.speed_mps / self.top_speed_mps);
                self.speed_mps += accel * dt;
                if self.speed_mps >= self.top_speed_mps * CRUISE_FRACTION {
                    self.enter(Phase::Cruise);
                }
            }
            Phase::Cruise => {
                if self.phase_ms >= CRUISE_DURATION.as_millis() as u64 {
                    self.enter(Phase::Braking);
                }
            }
            Phase::Braking => {
                self.speed_mps = (self.speed_mps - BRAKE_DECEL * dt).max(0.0);
                if self.speed_mps == 0.0 {
                    self.enter(Phase::Stopped);
                }
            }
        }

        self.latitude += f64::from(self.speed_mps * dt) * DEG_PER_M;
        self.timestamp_ms += dt_ms;
        self.fixes += 1;
    }
}

impl Iterator for SyntheticDrive {
    type Item = GpsFix;

    fn next(&mut self) -> Option<GpsFix> {
        if self.done {
            return None;
        }
        let fix = self.fix();
        self.advance();
        Some(fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_runs_only_stands_still() {
        let fixes: Vec<GpsFix> = SyntheticDrive::new(0, 30.0).collect();
        let expected = (STOP_DURATION.as_millis() / FIX_INTERVAL.as_millis()) as usize;
        assert_eq!(fixes.len(), expected);
        assert!(
            fixes.iter().all(|f| f.latitude == START_LATITUDE),
            "a parked car must not move"
        );
    }

    #[test]
    fn test_fixes_are_evenly_spaced() {
        let fixes: Vec<GpsFix> = SyntheticDrive::new(1, 30.0).collect();
        for pair in fixes.windows(2) {
            assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, 100);
        }
    }

    #[test]
    fn test_run_reaches_top_speed_and_stops() {
        let top = 40.0;
        let fixes: Vec<GpsFix> = SyntheticDrive::new(1, top).collect();

        let peak = fixes
            .iter()
            .filter_map(|f| f.speed_mps)
            .fold(0.0f32, f32::max);
        assert!(peak > top * 0.95 && peak < top + 0.5, "peak {peak}");

        let last = fixes.last().unwrap();
        assert!(last.speed_mps.is_none_or(|s| s < 0.5), "drive must end parked");
        assert!(last.latitude > START_LATITUDE);
    }

    #[test]
    fn test_degraded_fixes_present() {
        let fixes: Vec<GpsFix> = SyntheticDrive::new(1, 30.0).collect();
        assert!(fixes.iter().any(|f| f.speed_mps.is_none()));
        assert!(fixes.iter().any(|f| f.accuracy_m > 25.0));
        assert!(fixes.iter().filter(|f| f.accuracy_m > 25.0).count() < fixes.len() / 10);
    }

    #[test]
    #[should_panic(expected = "top speed must be positive")]
    fn test_zero_top_speed_panics() { let _ = SyntheticDrive::new(1, 0.0); }
}
