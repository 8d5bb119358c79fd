//! Accounting-only bounded line queue
//!
//! Tracks line lengths and outstanding bytes without retaining any
//! content, for deployments where the caller keeps the text in its own
//! send buffer and the queue exists purely to gate admission. The
//! per-line overhead is the wire suffix the caller appends when
//! transmitting (one byte for `\n` by default).

use heapless::Deque;

use super::counter::LineCounter;

/// Bounded FIFO of line lengths with a shared byte budget
///
/// `LINES` bounds the entry count, `BYTES` the summed line lengths
/// including `SUFFIX` overhead per line. `MAX_LINE` clamps a single
/// line as in the content-owning strategy, keeping the two strategies
/// interchangeable behind [`LineCounter`].
#[derive(Debug)]
pub struct LengthLineQueue<
    const LINES: usize,
    const BYTES: usize,
    const MAX_LINE: usize,
    const SUFFIX: usize = 1,
> {
    lens: Deque<usize, LINES>,
    free_bytes: usize,
}

impl<const LINES: usize, const BYTES: usize, const MAX_LINE: usize, const SUFFIX: usize> Default
    for LengthLineQueue<LINES, BYTES, MAX_LINE, SUFFIX>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINES: usize, const BYTES: usize, const MAX_LINE: usize, const SUFFIX: usize>
    LengthLineQueue<LINES, BYTES, MAX_LINE, SUFFIX>
{
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            lens: Deque::new(),
            free_bytes: BYTES,
        }
    }

    /// Record a line by length alone; the caller owns the text
    pub fn push_len(&mut self, len: usize) -> bool {
        if !self.can_push(len) {
            return false;
        }
        let len = len.min(MAX_LINE);
        let _ = self.lens.push_back(len);
        self.free_bytes -= len + SUFFIX;
        true
    }
}

impl<const LINES: usize, const BYTES: usize, const MAX_LINE: usize, const SUFFIX: usize> LineCounter
    for LengthLineQueue<LINES, BYTES, MAX_LINE, SUFFIX>
{
    fn clear(&mut self) {
        self.lens.clear();
        self.free_bytes = BYTES;
    }

    fn can_push(&self, len: usize) -> bool {
        let len = len.min(MAX_LINE);
        len > 0 && self.lens.len() < LINES && self.free_bytes >= len + SUFFIX
    }

    fn push(&mut self, line: &[u8]) -> bool {
        self.push_len(line.len())
    }

    fn len(&self) -> usize {
        self.lens.len()
    }

    fn bytes(&self) -> usize {
        BYTES - self.free_bytes
    }

    fn free_lines(&self) -> usize {
        LINES - self.lens.len()
    }

    fn free_bytes(&self) -> usize {
        self.free_bytes
    }

    fn peek_len(&mut self) -> usize {
        self.lens.front().copied().unwrap_or(0)
    }

    fn pop(&mut self) {
        if let Some(len) = self.lens.pop_front() {
            self.free_bytes += len + SUFFIX;
        }
    }
}
