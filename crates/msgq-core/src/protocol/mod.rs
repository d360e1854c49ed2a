//! msgq wire protocol.
//!
//! - `header`: well-known envelope keys, commands and wildcards.
//! - `envelope`: the routing/control header carried by every frame.
//! - `wire`: value codec (JSON) for envelopes and payloads.
//! - `frame`: length-prefixed framing (`u32 total | u16 header_len | header | body?`).
//!
//! All parsers are panic-free: malformed input is reported as `MsgqError`
//! instead of panicking or indexing raw buffers, so a broken peer cannot take
//! the client down.

pub mod envelope;
pub mod frame;
pub mod header;
pub mod wire;

pub use envelope::Envelope;
pub use frame::{decode_frame, encode_frame, Message};

/// Arbitrary structured value carried as a payload (null, bool, number,
/// string, list, map).
pub use serde_json::Value;
