//! Centralized speed and GPS threshold configuration.
//!
//! All thresholds are compile-time constants with validation assertions, so
//! the estimator, the speed state and the acceleration timer agree on what
//! "standing still" or "too inaccurate" means.
//!
//! # Usage
//!
//! ```ignore
//! use speedo_common::thresholds::{STANDSTILL_MPS, is_standstill};
//! ```

// =============================================================================
// Standstill Detection
// =============================================================================

/// Speed below which the vehicle is considered stationary (m/s, ~1.8 km/h).
/// GPS jitter on a parked phone regularly reports 0.3-0.8 m/s.
pub const STANDSTILL_MPS: f32 = 0.5;

/// Check if a speed counts as standing still.
#[inline]
pub fn is_standstill(speed_mps: f32) -> bool { speed_mps < STANDSTILL_MPS }

// =============================================================================
// GPS Fix Quality
// =============================================================================

/// Fixes with a horizontal accuracy worse than this are discarded (meters).
pub const MAX_FIX_ACCURACY_M: f32 = 25.0;

/// Fixes further apart than this are not used to derive speed (ms).
/// A long gap usually means a tunnel or a suspended app.
pub const MAX_DERIVE_GAP_MS: u64 = 5_000;

/// Mean earth radius used by the haversine distance (meters).
pub const EARTH_RADIUS_M: f32 = 6_371_000.0;

// =============================================================================
// Speed Trend / Zones
// =============================================================================

/// Minimum difference between recent and older averages to report a trend (m/s).
pub const TREND_THRESHOLD_MPS: f32 = 0.5;

/// Fraction of the speed limit where the readout turns from green to yellow.
pub const SPEED_WARNING_RATIO: f32 = 0.9;

const _: () = assert!(SPEED_WARNING_RATIO > 0.0);
const _: () = assert!(SPEED_WARNING_RATIO < 1.0);

// =============================================================================
// Acceleration Timer
// =============================================================================

/// Runs longer than this are abandoned (ms).
pub const MAX_RUN_MS: u64 = 60_000;

// Preset speeds in m/s, derived from the conversion factors in `units`.

/// 60 mph in m/s.
pub const SIXTY_MPH_MPS: f32 = 26.8224;

/// 80 km/h in m/s.
pub const EIGHTY_KMH_MPS: f32 = 80.0 / 3.6;

/// 100 km/h in m/s.
pub const HUNDRED_KMH_MPS: f32 = 100.0 / 3.6;

/// 120 km/h in m/s.
pub const HUNDRED_TWENTY_KMH_MPS: f32 = 120.0 / 3.6;

/// 200 km/h in m/s.
pub const TWO_HUNDRED_KMH_MPS: f32 = 200.0 / 3.6;

const _: () = assert!(STANDSTILL_MPS < EIGHTY_KMH_MPS);
const _: () = assert!(EIGHTY_KMH_MPS < HUNDRED_KMH_MPS);
const _: () = assert!(HUNDRED_KMH_MPS < HUNDRED_TWENTY_KMH_MPS);
const _: () = assert!(HUNDRED_TWENTY_KMH_MPS < TWO_HUNDRED_KMH_MPS);

// =============================================================================
// Unit Tests
// =============================================================================
