//! Fixed-capacity record ring
//!
//! A byte arena storing variable-length records FIFO with a one-byte
//! length prefix. This is the storage primitive under both the
//! content-owning line queue and the tagged message queue: no
//! allocation, wraparound indexing over one contiguous block, and
//! every operation bounded by the record length.

/// Per-record framing cost in the byte budget (the length prefix)
pub const RECORD_OVERHEAD: usize = 1;

/// Ring of length-prefixed records over a fixed `N`-byte arena
///
/// One byte of each stored record is the length prefix, so a record
/// payload is limited to 255 bytes and a record occupies
/// `len + RECORD_OVERHEAD` arena bytes. `N` must be non-zero.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ByteRing<const N: usize> {
    data: [u8; N],
    /// Arena offset of the oldest record's length prefix
    head: usize,
    /// Occupied bytes, prefixes included
    used: usize,
}

impl<const N: usize> Default for ByteRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteRing<N> {
    /// Create an empty ring
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            head: 0,
            used: 0,
        }
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.head = 0;
        self.used = 0;
    }

    /// Occupied bytes, length prefixes included
    pub fn used(&self) -> usize {
        self.used
    }

    /// Remaining arena bytes
    pub fn free(&self) -> usize {
        N - self.used
    }

    /// True if no records are stored
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Append one record; false if it does not fit
    ///
    /// A record needs `payload.len() + RECORD_OVERHEAD` free bytes and
    /// the payload must not exceed 255 bytes. On rejection the ring is
    /// unchanged.
    pub fn push_record(&mut self, payload: &[u8]) -> bool {
        if payload.len() > u8::MAX as usize {
            return false;
        }
        let needed = payload.len() + RECORD_OVERHEAD;
        if needed > self.free() {
            return false;
        }

        let mut w = (self.head + self.used) % N;
        self.data[w] = payload.len() as u8;
        w = (w + 1) % N;
        for &b in payload {
            self.data[w] = b;
            w = (w + 1) % N;
        }
        self.used += needed;
        true
    }

    /// Remove the oldest record, copying its payload into `out`
    ///
    /// Returns the record's payload length, or 0 when the ring is
    /// empty. Payload bytes beyond `out.len()` are discarded.
    pub fn pop_record(&mut self, out: &mut [u8]) -> usize {
        if self.used == 0 {
            return 0;
        }
        let len = self.data[self.head] as usize;
        let mut r = (self.head + 1) % N;
        for i in 0..len {
            if i < out.len() {
                out[i] = self.data[r];
            }
            r = (r + 1) % N;
        }
        self.head = r;
        self.used -= len + RECORD_OVERHEAD;
        len
    }

    /// Remove the oldest record without copying it
    ///
    /// Returns the skipped record's payload length, or 0 when empty.
    pub fn skip_record(&mut self) -> usize {
        if self.used == 0 {
            return 0;
        }
        let len = self.data[self.head] as usize;
        self.head = (self.head + 1 + len) % N;
        self.used -= len + RECORD_OVERHEAD;
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_roundtrip() {
        let mut ring = ByteRing::<32>::new();
        assert!(ring.push_record(b"jog"));
        assert!(ring.push_record(b"home"));
        assert_eq!(ring.used(), 3 + 1 + 4 + 1);

        let mut out = [0u8; 16];
        let n = ring.pop_record(&mut out);
        assert_eq!(&out[..n], b"jog");
        let n = ring.pop_record(&mut out);
        assert_eq!(&out[..n], b"home");
        assert!(ring.is_empty());
    }

    #[test]
    fn test_pop_empty_returns_zero() {
        let mut ring = ByteRing::<8>::new();
        let mut out = [0u8; 8];
        assert_eq!(ring.pop_record(&mut out), 0);
        assert_eq!(ring.skip_record(), 0);
    }

    #[test]
    fn test_rejects_record_that_does_not_fit() {
        let mut ring = ByteRing::<8>::new();
        // 7 payload bytes + 1 prefix fills the arena exactly
        assert!(ring.push_record(b"1234567"));
        assert!(!ring.push_record(b"x"));
        assert_eq!(ring.used(), 8);
    }

    #[test]
    fn test_wraparound_preserves_records() {
        let mut ring = ByteRing::<10>::new();
        let mut out = [0u8; 10];

        // Walk records across the arena boundary several times
        for i in 0..20u8 {
            let payload = [i, i.wrapping_add(1), i.wrapping_add(2)];
            assert!(ring.push_record(&payload));
            assert!(ring.push_record(&[i]));
            let n = ring.pop_record(&mut out);
            assert_eq!(&out[..n], &payload);
            let n = ring.pop_record(&mut out);
            assert_eq!(&out[..n], &[i]);
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_skip_record_advances() {
        let mut ring = ByteRing::<32>::new();
        ring.push_record(b"first");
        ring.push_record(b"second");
        assert_eq!(ring.skip_record(), 5);

        let mut out = [0u8; 16];
        let n = ring.pop_record(&mut out);
        assert_eq!(&out[..n], b"second");
    }

    #[test]
    fn test_clear_resets() {
        let mut ring = ByteRing::<16>::new();
        ring.push_record(b"abc");
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.free(), 16);
    }
}
