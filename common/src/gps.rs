//! GPS fixes and speed estimation.
//!
//! The host location stream delivers [`GpsFix`] values. [`SpeedEstimator`]
//! filters out inaccurate and out-of-order fixes and turns the rest into
//! [`SpeedSample`]s, deriving speed from position when the receiver did not
//! report one.

use core::f64::consts::PI;

use crate::thresholds::{EARTH_RADIUS_M, MAX_DERIVE_GAP_MS, MAX_FIX_ACCURACY_M, is_standstill};

const DEG_TO_RAD: f64 = PI / 180.0;

/// A single position report from the location provider.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GpsFix {
    /// Milliseconds since an arbitrary epoch, monotonic per stream.
    pub timestamp_ms: u64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Ground speed reported by the receiver, if any (m/s).
    pub speed_mps: Option<f32>,
    /// Horizontal accuracy radius (meters).
    pub accuracy_m: f32,
}

/// A filtered speed reading.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SpeedSample {
    /// Timestamp of the fix this sample came from (ms).
    pub timestamp_ms: u64,
    /// Ground speed (m/s), never negative.
    pub speed_mps: f32,
}

impl SpeedSample {
    /// Create a sample.
    pub const fn new(
        timestamp_ms: u64,
        speed_mps: f32,
    ) -> Self {
        Self {
            timestamp_ms,
            speed_mps,
        }
    }
}

/// Great-circle distance between two fixes (haversine, meters).
///
/// Computed in `f64`: at 10 Hz consecutive fixes are only a few meters
/// apart, below the resolution of an `f32` latitude.
pub fn distance_m(
    a: &GpsFix,
    b: &GpsFix,
) -> f32 {
    let lat_a = a.latitude * DEG_TO_RAD;
    let lat_b = b.latitude * DEG_TO_RAD;
    let half_dlat = (lat_b - lat_a) / 2.0;
    let half_dlon = (b.longitude - a.longitude) * DEG_TO_RAD / 2.0;

    let sin_dlat = libm::sin(half_dlat);
    let sin_dlon = libm::sin(half_dlon);
    let h = sin_dlat * sin_dlat + libm::cos(lat_a) * libm::cos(lat_b) * sin_dlon * sin_dlon;
    // Rounding can push h marginally outside [0, 1]
    let h = h.clamp(0.0, 1.0);

    (2.0 * f64::from(EARTH_RADIUS_M) * libm::asin(libm::sqrt(h))) as f32
}

/// Clamp garbage speeds to zero and snap jitter below standstill to zero.
fn sanitize_speed(speed_mps: f32) -> f32 {
    if !speed_mps.is_finite() || !(speed_mps > 0.0) || is_standstill(speed_mps) {
        0.0
    } else {
        speed_mps
    }
}

/// Turns raw fixes into speed samples.
#[derive(Clone, Debug, Default)]
pub struct SpeedEstimator {
    last: Option<GpsFix>,
    rejected: u32,
}

impl SpeedEstimator {
    /// Create an estimator with no history.
    pub const fn new() -> Self {
        Self {
            last: None,
            rejected: 0,
        }
    }

    /// Feed the next fix.
    ///
    /// Returns `None` when the fix is rejected or when no speed can be
    /// determined yet (first fix without a reported speed).
    pub fn update(
        &mut self,
        fix: GpsFix,
    ) -> Option<SpeedSample> {
        // Negated comparison also rejects NaN accuracy
        if !(fix.accuracy_m <= MAX_FIX_ACCURACY_M) {
            self.rejected = self.rejected.saturating_add(1);
            log::debug!("gps: dropping fix at {} ms, accuracy {} m", fix.timestamp_ms, fix.accuracy_m);
            return None;
        }

        if let Some(last) = self.last
            && fix.timestamp_ms <= last.timestamp_ms
        {
            self.rejected = self.rejected.saturating_add(1);
            log::debug!("gps: dropping stale fix at {} ms", fix.timestamp_ms);
            return None;
        }

        // A non-finite reported speed is treated as missing
        let speed = match fix.speed_mps.filter(|s| s.is_finite()) {
            Some(speed) => Some(speed),
            None => self.last.and_then(|last| derive_speed(&last, &fix)),
        };
        self.last = Some(fix);

        speed.map(|speed| SpeedSample::new(fix.timestamp_ms, sanitize_speed(speed)))
    }

    /// Number of fixes rejected since creation or the last reset.
    #[inline]
    pub const fn rejected(&self) -> u32 { self.rejected }

    /// Forget the previous fix and the rejection count.
    pub fn reset(&mut self) {
        self.last = None;
        self.rejected = 0;
    }
}

/// Speed between two accepted fixes, or `None` if they are too far apart in time.
fn derive_speed(
    prev: &GpsFix,
    next: &GpsFix,
) -> Option<f32> {
    let dt_ms = next.timestamp_ms.checked_sub(prev.timestamp_ms)?;
    if dt_ms == 0 || dt_ms > MAX_DERIVE_GAP_MS {
        return None;
    }
    Some(distance_m(prev, next) / (dt_ms as f32 / 1000.0))
}

// =============================================================================
// Unit Tests
// =============================================================================
