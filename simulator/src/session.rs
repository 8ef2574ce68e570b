//! One speedometer session: fixes in, speed readout and run results out.
//!
//! Wires the core together the way the app screen does: the estimator turns
//! fixes into samples, which feed the readout state and the stopwatch.
//! Finished runs go to the history and the stopwatch re-arms for the next
//! launch.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;
use speedo_common::config::LOG_MSG_LEN;
use speedo_common::history::ResultHistory;
use speedo_common::log_buffer::{LogBuffer, LogLevel, push_secs};
use speedo_common::speed_state::SpeedState;
use speedo_common::theme::{GREEN, RED, WHITE, YELLOW, speed_color};
use speedo_common::{AccelPreset, AccelResult, AccelTimer, GpsFix, SpeedEstimator, TimerEvent};

/// Human name of a readout color zone.
pub fn zone_name(color: Rgb565) -> &'static str {
    if color == RED {
        "over limit"
    } else if color == YELLOW {
        "near limit"
    } else if color == GREEN {
        "under limit"
    } else {
        "no limit"
    }
}

pub struct Session {
    preset: AccelPreset,
    limit_mps: Option<f32>,
    estimator: SpeedEstimator,
    speed: SpeedState,
    timer: AccelTimer,
    history: ResultHistory,
    log: LogBuffer,
    zone: Rgb565,
    fixes: u32,
}

impl Session {
    /// Start a session timing `preset`, with an optional speed limit (m/s).
    pub fn new(
        preset: AccelPreset,
        limit_mps: Option<f32>,
    ) -> Self {
        let mut timer = AccelTimer::new();
        timer.arm(preset);
        Self {
            preset,
            limit_mps,
            estimator: SpeedEstimator::new(),
            speed: SpeedState::new(),
            timer,
            history: ResultHistory::new(),
            log: LogBuffer::new(),
            zone: WHITE,
            fixes: 0,
        }
    }

    /// Feed the next GPS fix.
    pub fn feed(
        &mut self,
        fix: GpsFix,
    ) {
        self.fixes += 1;
        let Some(sample) = self.estimator.update(fix) else {
            return;
        };
        self.speed.update(sample.speed_mps);

        let zone = speed_color(sample.speed_mps, self.limit_mps);
        if zone != self.zone {
            log::debug!("readout: {} at {:.1} m/s", zone_name(zone), sample.speed_mps);
            self.zone = zone;
        }

        let now = sample.timestamp_ms;
        match self.timer.update(sample) {
            Some(TimerEvent::Started { start_ms }) => {
                self.log.record(LogLevel::Info, start_ms, "Run started");
            }
            Some(TimerEvent::Finished(result)) => {
                self.finish(now, result);
            }
            Some(TimerEvent::Aborted) => {
                self.log.record(LogLevel::Warn, now, "Run aborted");
            }
            Some(TimerEvent::TimedOut) => {
                self.log.record(LogLevel::Warn, now, "Run timed out");
                self.timer.arm(self.preset);
            }
            None => {}
        }
    }

    fn finish(
        &mut self,
        now: u64,
        result: AccelResult,
    ) {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        msg.push_str(result.preset.label()).ok();
        msg.push_str(": ").ok();
        push_secs(&mut msg, result.elapsed_ms);
        msg.push_str(" s").ok();

        let is_best = self
            .history
            .best(result.preset)
            .is_none_or(|best| result.elapsed_ms < best.elapsed_ms);
        if is_best {
            msg.push_str(" (best)").ok();
        }
        self.log.record(LogLevel::Info, now, &msg);

        self.history.record(result);
        self.timer.arm(self.preset);
    }

    #[inline]
    pub fn speed(&self) -> &SpeedState { &self.speed }

    #[inline]
    pub fn history(&self) -> &ResultHistory { &self.history }

    #[inline]
    pub fn log(&self) -> &LogBuffer { &self.log }

    #[inline]
    pub const fn preset(&self) -> AccelPreset { self.preset }

    /// Fixes fed so far.
    #[inline]
    pub const fn fixes(&self) -> u32 { self.fixes }

    /// Fixes the estimator threw away.
    #[inline]
    pub fn rejected(&self) -> u32 { self.estimator.rejected() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::SyntheticDrive;

    const TOP_SPEED_MPS: f32 = 230.0 / 3.6;

    fn run(
        preset: AccelPreset,
        runs: u32,
    ) -> Session {
        let mut session = Session::new(preset, None);
        for fix in SyntheticDrive::new(runs, TOP_SPEED_MPS) {
            session.feed(fix);
        }
        session
    }

    #[test]
    fn test_standing_start_runs_recorded() {
        let session = run(AccelPreset::ZeroToHundredKmh, 2);
        let history = session.history();
        assert_eq!(history.count(AccelPreset::ZeroToHundredKmh), 2);
        for result in history.iter() {
            assert!(
                (5500..=6500).contains(&result.elapsed_ms),
                "0-100 took {} ms",
                result.elapsed_ms
            );
        }
    }

    #[test]
    fn test_rolling_start_runs_recorded() {
        let session = run(AccelPreset::EightyToHundredTwentyKmh, 2);
        assert_eq!(session.history().len(), 2);
        assert!(session.history().iter().all(|r| r.elapsed_ms > 0));
    }

    #[test]
    fn test_poor_fixes_rejected() {
        let session = run(AccelPreset::ZeroToHundredKmh, 1);
        assert!(session.rejected() > 0);
        assert!(session.rejected() < session.fixes());
    }

    #[test]
    fn test_speed_state_tracks_drive() {
        let session = run(AccelPreset::ZeroToHundredKmh, 1);
        let max = session.speed().max();
        assert!(max > TOP_SPEED_MPS * 0.95, "max {max}");
        assert!(session.speed().current() < 0.5, "drive ends parked");
        assert!(session.speed().average().is_some());
    }

    #[test]
    fn test_finished_runs_logged() {
        let session = run(AccelPreset::ZeroToHundredKmh, 1);
        let finished = session
            .log()
            .iter()
            .find(|e| e.message.starts_with("0-100 km/h: "))
            .expect("finish entry");
        assert!(finished.message.ends_with(" s (best)"), "{}", finished.message);
    }

    #[test]
    fn test_zone_names() {
        assert_eq!(zone_name(speed_color(30.0, None)), "no limit");
        assert_eq!(zone_name(speed_color(35.0, Some(30.0))), "over limit");
        assert_eq!(zone_name(speed_color(28.0, Some(30.0))), "near limit");
        assert_eq!(zone_name(speed_color(10.0, Some(30.0))), "under limit");
    }
}
