//! GRBL-style Serial Text Protocol
//!
//! This crate defines the text protocol spoken between the Traverse pendant
//! and a GRBL-style machine controller over a serial link. The protocol is
//! line oriented in both directions:
//!
//! - **Outbound**: short G-code-style command lines, most importantly
//!   relative jog commands of the form `$J=G91 F100 X-0.1`, terminated
//!   with `\n` on the wire.
//! - **Inbound**: newline-terminated response lines. The controller
//!   answers every accepted command with a line starting with `ok` or
//!   `error`; anything else (status reports, banners) is informational.
//!
//! The pendant sends one command per jog-wheel detent and retires the
//! oldest outstanding command whenever an `ok`/`error` line arrives, so
//! the only protocol state that matters here is "how do I build a jog
//! line" and "which kind of line did I just receive".

#![no_std]
#![deny(unsafe_code)]

pub mod jog;
pub mod response;

pub use jog::{jog_command, JogAxis, JogStep, MAX_JOG_CMD};
pub use response::{LineSplitter, ResponseKind, MAX_RESPONSE_LEN};
