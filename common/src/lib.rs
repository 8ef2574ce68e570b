//! Core logic for the GPS speedometer.
//!
//! This crate contains the platform-agnostic pieces shared between the
//! simulator and the host application:
//!
//! - [`responsive`]: Device tier classification and tiered value resolution
//! - [`config`]: Breakpoints, buffer sizes and layout constants
//! - [`thresholds`]: Speed and GPS threshold values
//! - [`units`]: Speed unit conversions
//! - [`gps`]: GPS fixes, distance and speed estimation
//! - [`speed_state`]: Peak hold, rolling average, trend and graph history
//! - [`accel_timer`]: Acceleration run state machine (0-60, 0-100, ...)
//! - [`history`]: Bounded in-memory history of finished runs
//! - [`theme`]: Palette and tier-dependent text styles
//! - [`log_buffer`]: Levelled ring buffer for on-screen log viewing
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests and never allocates. Containers are
//! fixed-capacity `heapless` types.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod accel_timer;
pub mod config;
pub mod gps;
pub mod history;
pub mod log_buffer;
pub mod responsive;
pub mod speed_state;
pub mod theme;
pub mod thresholds;
pub mod units;

// Re-export commonly used items
pub use accel_timer::{AccelPreset, AccelResult, AccelTimer, TimerEvent, TimerState};
pub use gps::{GpsFix, SpeedEstimator, SpeedSample};
pub use responsive::{DeviceTier, Orientation, TieredValue, Viewport, classify, resolve};
pub use units::SpeedUnit;
