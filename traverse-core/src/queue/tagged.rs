//! Tagged message queue for acknowledgement correlation
//!
//! Pairs a payload arena with a FIFO of opaque caller-owned tags, one
//! tag per message. The pendant parks each transmitted command here
//! until the controller's `ok`/`error` line arrives, at which point the
//! oldest message and its tag are retired together.

use heapless::{Deque, Vec};

use super::ring::{ByteRing, RECORD_OVERHEAD};

/// Fixed tag FIFO depth, independent of the payload arena size
///
/// Deliberately the tighter of the two bounds: however large the arena,
/// at most this many messages can be in flight.
pub const SENDER_QUEUE_SIZE: usize = 50;

/// One queued message viewed through [`TaggedQueue::peek`]
///
/// Borrows the queue's peek cache and tag FIFO; valid until the next
/// `pop` or `push`.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaggedMessage<'a, T> {
    /// Payload bytes as stored (possibly clamped at push)
    pub data: &'a [u8],
    /// The caller-supplied correlation tag
    pub tag: &'a T,
}

/// Bounded FIFO of tagged messages over a fixed byte arena
///
/// `BYTES` is the arena capacity, `MAX_LINE` the per-message payload
/// clamp (at most 255). The queue stores and returns tags but never
/// inspects or duplicates them; a message's payload and tag enter and
/// leave together, so payload count always equals tag count.
#[derive(Debug)]
pub struct TaggedQueue<T, const BYTES: usize, const MAX_LINE: usize> {
    ring: ByteRing<BYTES>,
    tags: Deque<T, SENDER_QUEUE_SIZE>,
    item_count: usize,
    bytes_count: usize,
    /// Oldest payload, materialized out of the ring until the next pop
    peeked: Vec<u8, MAX_LINE>,
    have_peeked: bool,
}

impl<T, const BYTES: usize, const MAX_LINE: usize> Default for TaggedQueue<T, BYTES, MAX_LINE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const BYTES: usize, const MAX_LINE: usize> TaggedQueue<T, BYTES, MAX_LINE> {
    /// One-byte record framing caps the payload length
    const LINE_LEN_FITS: () = assert!(MAX_LINE <= u8::MAX as usize);

    /// Create an empty queue
    pub fn new() -> Self {
        let _ = Self::LINE_LEN_FITS;
        Self {
            ring: ByteRing::new(),
            tags: Deque::new(),
            item_count: 0,
            bytes_count: 0,
            peeked: Vec::new(),
            have_peeked: false,
        }
    }

    /// Drop all messages and tags
    pub fn clear(&mut self) {
        self.ring.clear();
        self.tags.clear();
        self.item_count = 0;
        self.bytes_count = 0;
        self.peeked.clear();
        self.have_peeked = false;
    }

    /// True iff a payload of `len` bytes (after clamping) fits the
    /// arena AND a tag slot is free; neither resource substitutes for
    /// the other
    pub fn can_push(&self, len: usize) -> bool {
        let len = len.min(MAX_LINE);
        self.free_tags() > 0 && len + RECORD_OVERHEAD <= self.available()
    }

    /// Enqueue a payload with its correlation tag
    ///
    /// Either both are stored or neither is; on rejection the tag is
    /// handed back unchanged. The tag slot is checked first, it being
    /// the tighter bound.
    pub fn push(&mut self, data: &[u8], tag: T) -> Result<(), T> {
        if !self.can_push(data.len()) {
            return Err(tag);
        }
        let len = data.len().min(MAX_LINE);
        if !self.ring.push_record(&data[..len]) {
            return Err(tag);
        }
        // Cannot fail: can_push checked for a free slot
        let _ = self.tags.push_back(tag);
        self.item_count += 1;
        self.bytes_count += len + RECORD_OVERHEAD;
        Ok(())
    }

    /// Number of queued messages
    pub fn len(&self) -> usize {
        self.item_count
    }

    /// Occupied arena bytes, record overhead included
    pub fn bytes(&self) -> usize {
        self.bytes_count
    }

    /// Remaining arena byte headroom
    pub fn available(&self) -> usize {
        BYTES - self.bytes_count
    }

    /// Remaining tag slots
    pub fn free_tags(&self) -> usize {
        SENDER_QUEUE_SIZE - self.tags.len()
    }

    /// True if no messages are queued
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Oldest message without removing it; `None` when empty
    ///
    /// Repeated calls before a `pop` return the identical message.
    pub fn peek(&mut self) -> Option<TaggedMessage<'_, T>> {
        if self.item_count == 0 {
            return None;
        }
        if !self.have_peeked {
            self.load_peek();
        }
        let tag = self.tags.front()?;
        Some(TaggedMessage {
            data: &self.peeked,
            tag,
        })
    }

    /// Remove the oldest message and its tag together; false when empty
    pub fn pop(&mut self) -> bool {
        self.take().is_some()
    }

    /// Remove the oldest message, returning its tag to the caller
    pub fn take(&mut self) -> Option<T> {
        if self.item_count == 0 {
            return None;
        }
        if !self.have_peeked {
            self.load_peek();
        }
        self.item_count -= 1;
        self.bytes_count -= self.peeked.len() + RECORD_OVERHEAD;
        self.peeked.clear();
        self.have_peeked = false;
        self.tags.pop_front()
    }

    fn load_peek(&mut self) {
        self.peeked.clear();
        let _ = self.peeked.resize_default(MAX_LINE);
        let n = self.ring.pop_record(&mut self.peeked);
        self.peeked.truncate(n);
        self.have_peeked = true;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_payload_and_tag_travel_together() {
        let mut q = TaggedQueue::<u16, 64, 16>::new();
        q.push(b"$J=G91 F100 X1", 7).unwrap();
        q.push(b"M114", 9).unwrap();

        let msg = q.peek().unwrap();
        assert_eq!(msg.data, b"$J=G91 F100 X1");
        assert_eq!(*msg.tag, 7);

        assert_eq!(q.take(), Some(7));
        assert_eq!(q.take(), Some(9));
        assert_eq!(q.take(), None);
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut q = TaggedQueue::<u8, 32, 8>::new();
        q.push(b"abc", 1).unwrap();

        for _ in 0..3 {
            let msg = q.peek().unwrap();
            assert_eq!(msg.data, b"abc");
            assert_eq!(*msg.tag, 1);
        }
        assert_eq!(q.len(), 1);
        assert_eq!(q.bytes(), 3 + RECORD_OVERHEAD);
    }

    #[test]
    fn test_tag_slots_are_the_tighter_bound() {
        // Plenty of arena, exactly SENDER_QUEUE_SIZE tag slots
        let mut q = TaggedQueue::<usize, 256, 8>::new();
        for i in 0..SENDER_QUEUE_SIZE {
            assert!(q.push(b"a", i).is_ok());
        }
        assert!(q.available() > RECORD_OVERHEAD + 1);
        assert!(!q.can_push(1));
        assert_eq!(q.push(b"a", 99), Err(99));
        assert_eq!(q.len(), SENDER_QUEUE_SIZE);

        // Popping one restores exactly one slot
        assert!(q.pop());
        assert_eq!(q.free_tags(), 1);
        assert!(q.push(b"a", 99).is_ok());
    }

    #[test]
    fn test_byte_budget_is_mandatory_too() {
        let mut q = TaggedQueue::<u8, 8, 8>::new();
        q.push(b"abcdefg", 1).unwrap(); // fills the arena
        assert!(q.free_tags() > 0);
        assert!(!q.can_push(1));
        assert_eq!(q.push(b"x", 2), Err(2));
    }

    #[test]
    fn test_rejection_changes_nothing() {
        let mut q = TaggedQueue::<u8, 8, 8>::new();
        q.push(b"abcde", 1).unwrap();
        let (len, bytes, avail) = (q.len(), q.bytes(), q.available());

        assert_eq!(q.push(b"abcde", 2), Err(2));
        assert_eq!(q.len(), len);
        assert_eq!(q.bytes(), bytes);
        assert_eq!(q.available(), avail);
        assert_eq!(q.take(), Some(1));
    }

    #[test]
    fn test_overlong_payload_is_clamped() {
        let mut q = TaggedQueue::<u8, 32, 4>::new();
        q.push(b"abcdefgh", 1).unwrap();
        assert_eq!(q.bytes(), 4 + RECORD_OVERHEAD);
        assert_eq!(q.peek().unwrap().data, b"abcd");
    }

    #[test]
    fn test_pop_after_peek_releases_exact_budget() {
        let mut q = TaggedQueue::<u8, 32, 16>::new();
        q.push(b"abc", 1).unwrap();
        q.push(b"defgh", 2).unwrap();

        q.peek();
        assert!(q.pop());
        assert_eq!(q.bytes(), 5 + RECORD_OVERHEAD);
        assert_eq!(q.peek().unwrap().data, b"defgh");
    }

    #[test]
    fn test_pop_empty_returns_false() {
        let mut q = TaggedQueue::<u8, 16, 8>::new();
        assert!(!q.pop());
        assert!(q.peek().is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn test_clear_resets_both_structures() {
        let mut q = TaggedQueue::<u8, 32, 8>::new();
        q.push(b"abc", 1).unwrap();
        q.peek();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.free_tags(), SENDER_QUEUE_SIZE);
        assert_eq!(q.available(), 32);
        assert!(q.peek().is_none());
    }

    proptest! {
        /// Ops are (selector, length) pairs: 0 pops, else pushes
        #[test]
        fn parity_holds_for_any_op_sequence(
            ops in proptest::collection::vec((0u8..3, 1usize..9), 0..300),
        ) {
            let mut q = TaggedQueue::<u32, 64, 8>::new();
            let mut pushed = 0u32;

            for (op, len) in ops {
                if op == 0 {
                    q.pop();
                } else if q.push(&[0x42; 8][..len], pushed).is_ok() {
                    pushed += 1;
                }
                // Tag count equals payload count at every observable point
                assert_eq!(q.len(), SENDER_QUEUE_SIZE - q.free_tags());
                assert_eq!(q.bytes() + q.available(), 64);
            }
        }
    }
}
