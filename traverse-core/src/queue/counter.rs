//! Shared admission contract for the bounded line queues
//!
//! Both queue strategies track the same two scarce resources - line
//! slots and arena bytes - and expose the same operations, so the
//! command pipeline can be written against this trait and the backing
//! strategy chosen at deployment time.

/// Bounded FIFO of text lines with dual line/byte accounting
///
/// Every operation is non-blocking, allocation-free, and O(1) in the
/// number of queued lines. Capacity exhaustion and empty access are
/// routine conditions signaled by return value, never by panic.
///
/// # Truncation policy
///
/// Lines longer than the strategy's maximum line length are clamped
/// *before* the capacity check, and only the clamped prefix is stored
/// (clamp-then-check). `can_push` applies the same clamp, so the
/// predicate and the push can never disagree about an over-length
/// line. Callers needing longer lines must pre-split them.
///
/// # Invariants
///
/// - `len() + free_lines()` equals the line capacity at all times
/// - `bytes() + free_bytes()` equals the byte capacity at all times
/// - a rejected push changes nothing; checks precede mutation
/// - a pop releases exactly the stored line's budget (actual stored
///   length plus per-line overhead), not the requested length
pub trait LineCounter {
    /// Reset to empty; invalidates any peek cache
    fn clear(&mut self);

    /// True iff a line of `len` bytes (after clamping) fits both the
    /// line-count and byte budgets; pure, repeatable, side-effect free
    fn can_push(&self, len: usize) -> bool;

    /// Enqueue one line; false (with no state change) when it does
    /// not fit or the line is empty
    fn push(&mut self, line: &[u8]) -> bool;

    /// Number of queued lines
    fn len(&self) -> usize;

    /// Occupied bytes, per-line overhead included
    fn bytes(&self) -> usize;

    /// Remaining line slots
    fn free_lines(&self) -> usize;

    /// Remaining byte budget
    fn free_bytes(&self) -> usize;

    /// Length of the oldest line without removing it; 0 when empty.
    /// Idempotent until the next `pop`.
    fn peek_len(&mut self) -> usize;

    /// Remove the oldest line; no-op when empty
    fn pop(&mut self);

    /// True if no lines are queued
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
