//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Interval between synthetic GPS fixes (10 Hz, the fastest rate phone
/// receivers commonly deliver).
pub const FIX_INTERVAL: Duration = Duration::from_millis(100);

/// Time spent standing still before each launch and after the last run.
pub const STOP_DURATION: Duration = Duration::from_secs(3);

/// Time spent at top speed before braking.
pub const CRUISE_DURATION: Duration = Duration::from_secs(2);
