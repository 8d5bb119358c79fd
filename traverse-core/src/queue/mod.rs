//! Bounded, allocation-free line queues
//!
//! Two interchangeable strategies behind the [`LineCounter`] contract:
//!
//! - [`BufferedLineQueue`] owns line content in a fixed byte arena;
//! - [`LengthLineQueue`] tracks only line lengths, for callers that
//!   keep the text in their own send buffer.
//!
//! [`TaggedQueue`] pairs the same arena with a FIFO of opaque
//! correlation tags, one per message, for tracking in-flight commands
//! until their acknowledgement arrives.

pub mod buffered;
pub mod counter;
pub mod lengths;
pub mod ring;
pub mod tagged;

pub use buffered::BufferedLineQueue;
pub use counter::LineCounter;
pub use lengths::LengthLineQueue;
pub use ring::{ByteRing, RECORD_OVERHEAD};
pub use tagged::{TaggedMessage, TaggedQueue, SENDER_QUEUE_SIZE};
