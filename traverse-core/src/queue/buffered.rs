//! Content-owning bounded line queue
//!
//! Stores line bytes in a [`ByteRing`] arena and tracks free line
//! slots and free arena bytes as explicit counters. A one-deep peek
//! cache materializes the oldest line out of the arena so the send
//! loop can inspect it, decide against sending, and retry later
//! without losing it.

use heapless::Vec;

use super::counter::LineCounter;
use super::ring::{ByteRing, RECORD_OVERHEAD};

/// Bounded FIFO of text lines backed by a fixed byte arena
///
/// `LINES` and `BYTES` are the two capacities; `MAX_LINE` bounds a
/// single line (at most 255, the record framing limit). Lines longer
/// than `MAX_LINE` are silently clamped; empty lines are rejected so
/// that a zero-length arena read can only mean "empty".
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferedLineQueue<const LINES: usize, const BYTES: usize, const MAX_LINE: usize> {
    ring: ByteRing<BYTES>,
    free_lines: usize,
    free_bytes: usize,
    /// Oldest line, materialized out of the ring until the next pop
    peeked: Vec<u8, MAX_LINE>,
    have_peeked: bool,
}

impl<const LINES: usize, const BYTES: usize, const MAX_LINE: usize> Default
    for BufferedLineQueue<LINES, BYTES, MAX_LINE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINES: usize, const BYTES: usize, const MAX_LINE: usize>
    BufferedLineQueue<LINES, BYTES, MAX_LINE>
{
    /// One-byte record framing caps the line length
    const LINE_LEN_FITS: () = assert!(MAX_LINE <= u8::MAX as usize);

    /// Create an empty queue
    pub fn new() -> Self {
        let _ = Self::LINE_LEN_FITS;
        Self {
            ring: ByteRing::new(),
            free_lines: LINES,
            free_bytes: BYTES,
            peeked: Vec::new(),
            have_peeked: false,
        }
    }

    /// Oldest line without removing it; `None` when empty
    ///
    /// Repeated calls before a `pop` return the identical bytes.
    pub fn peek(&mut self) -> Option<&[u8]> {
        if self.len() == 0 {
            return None;
        }
        if !self.have_peeked {
            self.load_peek();
        }
        Some(&self.peeked)
    }

    /// Pull the oldest record out of the ring into the peek cache.
    /// Its budget stays reserved until the matching pop.
    fn load_peek(&mut self) {
        self.peeked.clear();
        let _ = self.peeked.resize_default(MAX_LINE);
        let n = self.ring.pop_record(&mut self.peeked);
        self.peeked.truncate(n);
        self.have_peeked = true;
    }
}

impl<const LINES: usize, const BYTES: usize, const MAX_LINE: usize> LineCounter
    for BufferedLineQueue<LINES, BYTES, MAX_LINE>
{
    fn clear(&mut self) {
        self.ring.clear();
        self.peeked.clear();
        self.have_peeked = false;
        self.free_lines = LINES;
        self.free_bytes = BYTES;
    }

    fn can_push(&self, len: usize) -> bool {
        let len = len.min(MAX_LINE);
        len > 0 && self.free_lines > 0 && self.free_bytes >= len + RECORD_OVERHEAD
    }

    fn push(&mut self, line: &[u8]) -> bool {
        if !self.can_push(line.len()) {
            return false;
        }
        let len = line.len().min(MAX_LINE);
        if !self.ring.push_record(&line[..len]) {
            return false;
        }
        self.free_lines -= 1;
        self.free_bytes -= len + RECORD_OVERHEAD;
        true
    }

    fn len(&self) -> usize {
        LINES - self.free_lines
    }

    fn bytes(&self) -> usize {
        BYTES - self.free_bytes
    }

    fn free_lines(&self) -> usize {
        self.free_lines
    }

    fn free_bytes(&self) -> usize {
        self.free_bytes
    }

    fn peek_len(&mut self) -> usize {
        self.peek().map_or(0, |line| line.len())
    }

    fn pop(&mut self) {
        if self.len() == 0 {
            return;
        }
        self.free_lines += 1;
        if self.have_peeked {
            // Release exactly the cached line's budget
            self.free_bytes += self.peeked.len() + RECORD_OVERHEAD;
            self.have_peeked = false;
            self.peeked.clear();
        } else {
            let n = self.ring.skip_record();
            self.free_bytes += n + RECORD_OVERHEAD;
        }
    }
}
