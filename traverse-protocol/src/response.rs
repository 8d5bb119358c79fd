//! Response line splitting and classification
//!
//! The controller's serial output is a stream of newline-terminated
//! text lines. [`LineSplitter`] reassembles that stream one byte at a
//! time into complete lines; [`ResponseKind`] classifies each line so
//! the acknowledge loop knows whether to retire an outstanding command.

use heapless::Vec;

/// Maximum retained length of a response line
///
/// GRBL responses are short (`ok`, `error:9`, status reports under 80
/// bytes). Longer lines are truncated, not split: classification only
/// needs the prefix, and a torn tail must never masquerade as a fresh
/// line.
pub const MAX_RESPONSE_LEN: usize = 96;

/// Classification of one complete response line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseKind {
    /// Command accepted (`ok`)
    Ok,
    /// Command rejected (`error...`)
    Error,
    /// Status report, banner, or other unsolicited output
    Other,
}

impl ResponseKind {
    /// Classify a complete response line by its prefix
    pub fn classify(line: &[u8]) -> Self {
        if line.starts_with(b"ok") {
            ResponseKind::Ok
        } else if line.starts_with(b"error") {
            ResponseKind::Error
        } else {
            ResponseKind::Other
        }
    }

    /// True for the kinds that retire an outstanding command
    pub fn is_acknowledgement(self) -> bool {
        matches!(self, ResponseKind::Ok | ResponseKind::Error)
    }
}

/// Incremental splitter for newline-terminated response lines
///
/// Feed raw serial bytes one at a time; each `\n` completes a line.
/// `\r` is stripped so `\r\n` and bare `\n` terminators behave the
/// same. Bytes beyond [`MAX_RESPONSE_LEN`] within one line are dropped.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8, MAX_RESPONSE_LEN>,
    /// Buffer holds a completed line, cleared on the next feed
    complete: bool,
}

impl LineSplitter {
    /// Create an empty splitter
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            complete: false,
        }
    }

    /// Discard any assembled or partially assembled line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.complete = false;
    }

    /// Feed one byte; returns the completed line on `\n`
    ///
    /// The returned slice is valid until the next `feed` or `reset`.
    /// An empty line (bare `\n` or `\r\n`) is returned as an empty
    /// slice.
    pub fn feed(&mut self, byte: u8) -> Option<&[u8]> {
        if self.complete {
            self.buffer.clear();
            self.complete = false;
        }
        match byte {
            b'\n' => {
                self.complete = true;
                Some(&self.buffer)
            }
            b'\r' => None,
            _ => {
                // Over-length bytes are dropped, keeping the prefix intact
                let _ = self.buffer.push(byte);
                None
            }
        }
    }
}
