//! Outbound protocol model for uisync.
//!
//! This crate handles the shape of what is sent to the client: wire-safe
//! values, update operations, per-object messages and the per-cycle message
//! envelope. It does not know about typed property values; the codec crate
//! maps those onto `WireValue`s.
//!
//! # Design Principles
//!
//! - **One operation per key** - A later write for the same property or
//!   listener replaces the earlier one within a message.
//! - **Insertion order** - Operations keep the order of their first write.
//! - **Bounded building** - Operation and array counts are checked against limits.

mod error;
mod limits;
mod message;
mod value;

pub use error::{DecodeError, EncodeError, EncodeResult, LimitKind, WireResult};
pub use limits::Limits;
pub use message::{
    decode_message, encode_message, Message, ObjectMessage, Operation, OutboundChannel,
};
pub use value::WireValue;
