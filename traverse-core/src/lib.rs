//! Board-agnostic command queueing core for the Traverse jog pendant
//!
//! This crate contains all queueing logic that does not depend on
//! specific hardware implementations:
//!
//! - Fixed-capacity record ring (byte arena, no allocation)
//! - Bounded line queues behind a shared admission contract
//! - Tagged message queue for acknowledgement correlation
//! - Dual-queue command coordinator and send gating policy
//!
//! Everything here is single-producer/single-consumer per instance:
//! one execution context enqueues, one (possibly the same) dequeues,
//! and the counters and peek caches are never touched concurrently.
//! Cross-context handoff belongs to an outer channel layer, not here.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod queue;

pub use command::{CommandQueue, SendGate};
pub use queue::{
    BufferedLineQueue, ByteRing, LengthLineQueue, LineCounter, TaggedMessage, TaggedQueue,
    RECORD_OVERHEAD, SENDER_QUEUE_SIZE,
};
