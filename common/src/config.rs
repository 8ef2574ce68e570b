//! Layout and buffer configuration constants.
//!
//! All values are compile-time constants. Groups with an ordering requirement
//! carry `const` assertions, so a misconfigured table fails the build instead
//! of misclassifying a viewport at runtime.

// =============================================================================
// Viewport Breakpoints (device-independent pixels, inclusive lower bounds)
// =============================================================================

/// Minimum width of a small phone (e.g. iPhone SE first generation).
/// Anything narrower is an extra-small phone (implicit threshold 0).
pub const BREAKPOINT_SMALL_PHONE: f32 = 320.0;

/// Minimum width of a medium phone.
pub const BREAKPOINT_MEDIUM_PHONE: f32 = 360.0;

/// Minimum width of a large phone.
/// Also the reference width for linear size scaling.
pub const BREAKPOINT_LARGE_PHONE: f32 = 414.0;

/// Minimum width of a tablet.
pub const BREAKPOINT_TABLET: f32 = 768.0;

/// Minimum width of a desktop window.
pub const BREAKPOINT_DESKTOP: f32 = 1024.0;

// Compile-time validation: thresholds must be strictly increasing
const _: () = assert!(0.0 < BREAKPOINT_SMALL_PHONE);
const _: () = assert!(BREAKPOINT_SMALL_PHONE < BREAKPOINT_MEDIUM_PHONE);
const _: () = assert!(BREAKPOINT_MEDIUM_PHONE < BREAKPOINT_LARGE_PHONE);
const _: () = assert!(BREAKPOINT_LARGE_PHONE < BREAKPOINT_TABLET);
const _: () = assert!(BREAKPOINT_TABLET < BREAKPOINT_DESKTOP);

/// Reference width for `Viewport::scaled_size`.
pub const SCALE_REFERENCE_WIDTH: f32 = BREAKPOINT_LARGE_PHONE;

// =============================================================================
// Font Scaling
// =============================================================================

/// Smallest font size `Viewport::scaled_font_size` may return.
pub const MIN_SCALED_FONT: f32 = 10.0;

/// Largest font size `Viewport::scaled_font_size` may return.
pub const MAX_SCALED_FONT: f32 = 32.0;

const _: () = assert!(MIN_SCALED_FONT < MAX_SCALED_FONT);

// =============================================================================
// Speed State Configuration
// =============================================================================

/// Number of samples kept for trend detection.
/// At 1 Hz GPS this is a 20 second window.
pub const TREND_HISTORY_SIZE: usize = 20;

/// Samples averaged at each end of the trend window.
pub const TREND_WINDOW: usize = 5;

const _: () = assert!(TREND_WINDOW * 2 <= TREND_HISTORY_SIZE);

/// Number of samples in the rolling average buffer.
pub const AVG_BUFFER_SIZE: usize = 60;

/// Every Nth speed sample is added to the rolling average.
pub const AVG_SAMPLE_INTERVAL: u32 = 5;

/// Number of points in the speed graph.
pub const GRAPH_HISTORY_SIZE: usize = 60;

/// Every Nth speed sample is added to the graph.
pub const GRAPH_SAMPLE_INTERVAL: u32 = 2;

/// Number of samples a new top speed stays highlighted.
pub const PEAK_HOLD_SAMPLES: u32 = 3;

// =============================================================================
// Result History / Logging
// =============================================================================

/// Maximum number of acceleration results kept in memory.
pub const HISTORY_CAPACITY: usize = 32;

/// Maximum number of log entries kept for the on-screen log.
pub const LOG_ENTRIES: usize = 16;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 48;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)] // Intentional runtime mirror of the compile-time checks
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_ordering() {
        assert!(BREAKPOINT_SMALL_PHONE < BREAKPOINT_MEDIUM_PHONE);
        assert!(BREAKPOINT_MEDIUM_PHONE < BREAKPOINT_LARGE_PHONE);
        assert!(BREAKPOINT_LARGE_PHONE < BREAKPOINT_TABLET);
        assert!(BREAKPOINT_TABLET < BREAKPOINT_DESKTOP);
    }

    #[test]
    fn test_scale_reference_is_large_phone() {
        assert_eq!(SCALE_REFERENCE_WIDTH, 414.0);
    }

    #[test]
    fn test_buffer_sizes() {
        assert!(AVG_SAMPLE_INTERVAL > 0);
        assert!(GRAPH_SAMPLE_INTERVAL > 0);
        assert!(PEAK_HOLD_SAMPLES > 0);
        assert!(HISTORY_CAPACITY > 0);
        assert!(LOG_MSG_LEN > 1);
    }
}
