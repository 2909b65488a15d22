//! DCC++ Telemetry
//!
//! The base station reports sensor activity as `<Qn>`. Responses are read
//! up to the `>` terminator; bytes >= 127 are line noise and stripped
//! before matching. Only `<Q1`..`<Q5` are of interest, everything else is
//! ignored.

use crate::config::{DCC_TERMINATOR, TELEMETRY_LINE_MAX};
use crate::types::SensorIndex;

/// Match a terminator-stripped response against `<Qn`
#[must_use]
pub fn parse_sensor_report(line: &[u8]) -> Option<SensorIndex> {
    let mut clean = line.iter().copied().filter(|&b| b < 127);
    match (clean.next(), clean.next(), clean.next()) {
        (Some(b'<'), Some(b'Q'), Some(digit)) => SensorIndex::from_digit(digit),
        _ => None,
    }
}

/// Assembles terminator-delimited responses from serial bytes
///
/// A response longer than [`TELEMETRY_LINE_MAX`] is discarded up to its
/// terminator.
pub struct TelemetryReader {
    line: [u8; TELEMETRY_LINE_MAX],
    len: usize,
    overflowed: bool,
}

impl TelemetryReader {
    /// Create an empty reader
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: [0; TELEMETRY_LINE_MAX],
            len: 0,
            overflowed: false,
        }
    }

    /// Feed a byte, returns the completed response on the terminator
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        if byte == DCC_TERMINATOR {
            let len = core::mem::take(&mut self.len);
            if core::mem::take(&mut self.overflowed) {
                return None;
            }
            return Some(&self.line[..len]);
        }

        if self.overflowed {
            return None;
        }

        if self.len < self.line.len() {
            self.line[self.len] = byte;
            self.len += 1;
        } else {
            self.len = 0;
            self.overflowed = true;
        }
        None
    }

    /// Feed a byte and match the completed response
    pub fn feed(&mut self, byte: u8) -> Option<SensorIndex> {
        self.push(byte).and_then(parse_sensor_report)
    }

    /// Drop any partial response
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Bytes buffered for the current response
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.len
    }
}

impl Default for TelemetryReader {
    fn default() -> Self {
        Self::new()
    }
}
