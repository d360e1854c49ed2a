//! Length-prefixed frame encoding/decoding (panic-free).
//!
//! Layout (network byte order):
//!
//! ```text
//! [u32 total_length] [u16 header_length] [header bytes] [body bytes]?
//! total_length = 2 + len(header) + len(body)
//! ```
//!
//! Parsing rules:
//! - Never index (`buf[0]`); always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde_json::Value;

use super::envelope::Envelope;
use super::wire::{from_wire, to_wire};
use crate::error::{MsgqError, Result};

/// Size of the `total_length` prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;
/// Size of the `header_length` field.
pub const HEADER_LENGTH_SIZE: usize = 2;
/// Largest envelope that fits the `header_length` field.
pub const MAX_HEADER_BYTES: usize = u16::MAX as usize;

/// One decoded frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Routing/control header.
    pub envelope: Envelope,
    /// Body; absent for header-only control frames.
    pub payload: Option<Value>,
}

/// Frame split into its still-serialized segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Serialized envelope.
    pub header: Bytes,
    /// Serialized payload, if any bytes follow the header.
    pub body: Option<Bytes>,
}

/// Build a complete frame (length prefix included) from serialized segments.
pub fn encode_raw(header: &[u8], body: Option<&[u8]>) -> Result<Bytes> {
    let header_len = u16::try_from(header.len())
        .map_err(|_| MsgqError::Protocol(format!("envelope too large: {} bytes", header.len())))?;

    let body_len = body.map_or(0, <[u8]>::len);
    let total = HEADER_LENGTH_SIZE + header.len() + body_len;
    let total_len = u32::try_from(total)
        .map_err(|_| MsgqError::Protocol(format!("frame too large: {total} bytes")))?;

    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + total);
    buf.put_u32(total_len);
    buf.put_u16(header_len);
    buf.put_slice(header);
    if let Some(body) = body {
        buf.put_slice(body);
    }
    Ok(buf.freeze())
}

/// Serialize `envelope` and optional `payload` into a complete frame.
pub fn encode_frame(envelope: &Envelope, payload: Option<&Value>) -> Result<Bytes> {
    let header = to_wire(envelope)?;
    if header.len() > MAX_HEADER_BYTES {
        return Err(MsgqError::Protocol(format!(
            "envelope too large: {} bytes",
            header.len()
        )));
    }
    let body = payload.map(to_wire).transpose()?;
    encode_raw(&header, body.as_deref())
}

/// Split the bytes following the length prefix into header and body.
pub fn split_frame(mut buf: Bytes) -> Result<RawFrame> {
    if buf.remaining() < HEADER_LENGTH_SIZE {
        return Err(MsgqError::Protocol("frame too short for header length".into()));
    }
    let header_len = usize::from(buf.get_u16());

    if buf.remaining() < header_len {
        return Err(MsgqError::Protocol(format!(
            "header length {header_len} exceeds frame ({} bytes left)",
            buf.remaining()
        )));
    }
    let header = buf.split_to(header_len);

    let body = if buf.has_remaining() { Some(buf) } else { None };

    Ok(RawFrame { header, body })
}

/// Decode the bytes following the length prefix into a [`Message`].
pub fn decode_frame(buf: Bytes) -> Result<Message> {
    let raw = split_frame(buf)?;
    let envelope: Envelope = from_wire(&raw.header)?;
    let payload = raw.body.as_deref().map(from_wire::<Value>).transpose()?;
    Ok(Message { envelope, payload })
}
