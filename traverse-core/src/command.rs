//! Dual-queue command coordinator
//!
//! Ties the send-side line queue to the pending (awaiting-ack) tagged
//! queue. The send loop peeks the oldest unsent line, transmits it if
//! the gate allows, and commits the transmission by moving the line -
//! with its correlation tag - onto the pending side. The response loop
//! classifies each inbound line and retires the oldest pending message
//! on `ok`/`error`.
//!
//! Both sides are owned by the same execution context; see the crate
//! docs for the single-producer/single-consumer model.

use traverse_protocol::ResponseKind;

use crate::queue::{LineCounter, TaggedMessage, TaggedQueue};

/// Command queue pairing unsent lines with in-flight tagged messages
///
/// `Q` is the send-side strategy (content-owning or accounting-only,
/// chosen at deployment); the pending side always retains payload
/// bytes so outstanding-byte accounting survives either choice. `T` is
/// the caller-owned correlation tag attached at transmission time.
#[derive(Debug)]
pub struct CommandQueue<T, Q, const BYTES: usize, const MAX_LINE: usize>
where
    Q: LineCounter,
{
    send: Q,
    pending: TaggedQueue<T, BYTES, MAX_LINE>,
}

impl<T, Q, const BYTES: usize, const MAX_LINE: usize> Default
    for CommandQueue<T, Q, BYTES, MAX_LINE>
where
    Q: LineCounter + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Q, const BYTES: usize, const MAX_LINE: usize> CommandQueue<T, Q, BYTES, MAX_LINE>
where
    Q: LineCounter + Default,
{
    /// Create an empty coordinator
    pub fn new() -> Self {
        Self {
            send: Q::default(),
            pending: TaggedQueue::new(),
        }
    }
}

impl<T, Q, const BYTES: usize, const MAX_LINE: usize> CommandQueue<T, Q, BYTES, MAX_LINE>
where
    Q: LineCounter,
{
    /// Drop everything on both sides
    pub fn clear(&mut self) {
        self.send.clear();
        self.pending.clear();
    }

    /// True iff the send side can accept a line of `len` bytes
    pub fn can_push(&self, len: usize) -> bool {
        self.send.can_push(len)
    }

    /// Admit a line for later transmission; false when the send side
    /// is full (routine backpressure, retry or drop)
    pub fn push(&mut self, line: &[u8]) -> bool {
        self.send.push(line)
    }

    /// Send-side queue, for the transmit loop's peek-then-commit walk
    pub fn send(&mut self) -> &mut Q {
        &mut self.send
    }

    /// Send-side queue, read-only
    pub fn send_ref(&self) -> &Q {
        &self.send
    }

    /// Commit a successful transmission of the oldest unsent line
    ///
    /// Moves the line onto the pending side with its correlation tag:
    /// the pending side is checked *before* the send side is popped,
    /// so a full pending queue leaves the line queued and hands the
    /// tag back for a later retry.
    pub fn transmit(&mut self, line: &[u8], tag: T) -> Result<(), T> {
        if !self.pending.can_push(line.len()) {
            return Err(tag);
        }
        self.send.pop();
        self.pending.push(line, tag)
    }

    /// Oldest transmitted-but-unacknowledged message
    pub fn peek_pending(&mut self) -> Option<TaggedMessage<'_, T>> {
        self.pending.peek()
    }

    /// Retire the oldest pending message, returning its tag
    pub fn acknowledge(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Retire the oldest pending message if `kind` acknowledges one
    ///
    /// `Other` lines (status reports, banners) retire nothing.
    pub fn on_response(&mut self, kind: ResponseKind) -> Option<T> {
        if kind.is_acknowledgement() {
            self.acknowledge()
        } else {
            None
        }
    }

    /// True if no transmitted command awaits acknowledgement
    pub fn pending_is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Transmitted-but-unacknowledged message count
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Transmitted-but-unacknowledged bytes, overhead included
    pub fn pending_bytes(&self) -> usize {
        self.pending.bytes()
    }
}

/// Advisory transmission gate for a fixed-size downstream RX buffer
///
/// The controller parses out of a small serial receive buffer; keeping
/// transmitted-unacknowledged bytes under a fraction of it leaves room
/// for real-time overrides and avoids dropped characters. Advisory
/// only: the caller polls before sending, nothing blocks.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendGate {
    rx_buffer: usize,
}

impl SendGate {
    /// Use no more than 75% of the receiver's buffer
    const NUM: usize = 3;
    const DEN: usize = 4;

    /// Gate for a downstream receive buffer of `rx_buffer` bytes
    pub const fn new(rx_buffer: usize) -> Self {
        Self { rx_buffer }
    }

    /// True iff sending `next_len` more bytes keeps the outstanding
    /// total within the budget
    pub fn may_send(&self, pending_bytes: usize, next_len: usize) -> bool {
        pending_bytes + next_len <= self.rx_buffer * Self::NUM / Self::DEN
    }
}
