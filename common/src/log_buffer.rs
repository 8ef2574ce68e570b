//! Log buffer with levels and timestamps for on-screen log viewing.
//!
//! Provides a circular buffer of log entries shown on the debug screen.
//! Messages recorded through [`LogBuffer::record`] are also forwarded to the
//! `log` facade, so they reach whatever logger the host installed.
//!
//! # Log Levels
//!
//! - `Trace`: Gray - verbose debugging
//! - `Debug`: Gray - debugging information
//! - `Info`: Green - normal operation
//! - `Warn`: Yellow - warnings
//! - `Error`: Red - errors

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{Deque, String};

use crate::config::{LOG_ENTRIES, LOG_MSG_LEN};
use crate::theme::{GRAY, GREEN, RED, YELLOW};

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Verbose debugging (gray)
    Trace = 0,
    /// Debug information (gray)
    Debug = 1,
    /// Normal operation (green)
    #[default]
    Info = 2,
    /// Warnings (yellow)
    Warn = 3,
    /// Errors (red)
    Error = 4,
}

impl LogLevel {
    /// Get the display color for this log level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Trace | Self::Debug => GRAY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Get the single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
        }
    }
}

/// A single log entry with level, message, and timestamp.
#[derive(Clone, Debug, Default)]
pub struct LogEntry {
    /// Log severity level.
    pub level: LogLevel,
    /// Log message (truncated to `LOG_MSG_LEN - 1` characters).
    pub message: String<LOG_MSG_LEN>,
    /// Stream timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl LogEntry {
    /// Create a new log entry, truncating long messages.
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u64,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for c in message.chars().take(LOG_MSG_LEN - 1) {
            if msg.push(c).is_err() {
                // Multi-byte characters can fill the buffer early
                break;
            }
        }
        Self {
            level,
            message: msg,
            timestamp_ms,
        }
    }
}

/// Circular buffer of log entries.
pub struct LogBuffer {
    entries: Deque<LogEntry, LOG_ENTRIES>,
}

impl LogBuffer {
    /// Create a new empty log buffer.
    pub const fn new() -> Self { Self { entries: Deque::new() } }

    /// Push a new log entry. Oldest entry is dropped if buffer is full.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        self.entries.push_back(entry).ok();
    }

    /// Store a message and forward it to the `log` facade.
    pub fn record(
        &mut self,
        level: LogLevel,
        timestamp_ms: u64,
        message: &str,
    ) {
        let facade_level: log::Level = level.into();
        log::log!(facade_level, "[{timestamp_ms} ms] {message}");
        self.push(LogEntry::new(level, message, timestamp_ms));
    }

    /// Get the number of entries in the buffer.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Remove all entries.
    pub fn clear(&mut self) { self.entries.clear(); }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Push a u32 value to a heapless string (no format! macro).
pub fn push_u32<const N: usize>(
    s: &mut String<N>,
    mut val: u32,
) {
    if val == 0 {
        s.push('0').ok();
        return;
    }

    // Build digits in reverse
    let mut digits = [0u8; 10];
    let mut i = 0;
    while val > 0 {
        digits[i] = (val % 10) as u8;
        val /= 10;
        i += 1;
    }

    while i > 0 {
        i -= 1;
        s.push((b'0' + digits[i]) as char).ok();
    }
}

/// Format milliseconds as seconds with two decimals ("5.46").
pub fn push_secs<const N: usize>(
    s: &mut String<N>,
    ms: u64,
) {
    let ms = ms.min(u64::from(u32::MAX)) as u32;
    let hundredths = ms.saturating_add(5) / 10;
    push_u32(s, hundredths / 100);
    s.push('.').ok();
    let frac = hundredths % 100;
    if frac < 10 {
        s.push('0').ok();
    }
    push_u32(s, frac);
}

// =============================================================================
// Tests
// =============================================================================
