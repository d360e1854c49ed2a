//! Wire frame vectors under `tests/vectors/`.
//!
//! Each vector holds one complete frame (length prefix included) and either
//! the message it decodes to or the error code decoding must report.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use msgq_core::protocol::frame::LENGTH_PREFIX_SIZE;
use msgq_core::protocol::{Envelope, Message};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameVector {
    pub description: String,
    /// Why the expected outcome is what it is, when that is not obvious.
    #[serde(default)]
    pub note: Option<String>,
    pub frame: FrameData,
    #[serde(default)]
    pub expect: Option<ExpectedMessage>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

/// Decoded form of a well-formed frame. A `null` payload means header-only.
#[derive(Debug, Deserialize)]
pub struct ExpectedMessage {
    pub envelope: Envelope,
    #[serde(default)]
    pub payload: Option<Value>,
}

impl ExpectedMessage {
    pub fn into_message(self) -> Message {
        Message {
            envelope: self.envelope,
            payload: self.payload,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    /// `ErrorKind::as_str()` of the decode error.
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct FrameData {
    pub encoding: String,
    pub data: String,
}

impl FrameData {
    pub fn bytes(&self) -> Vec<u8> {
        match self.encoding.as_str() {
            "base64" => base64::engine::general_purpose::STANDARD
                .decode(&self.data)
                .expect("invalid base64 in test vector"),
            "hex" => hex::decode(&self.data).expect("invalid hex in test vector"),
            other => panic!("unsupported encoding: {other}"),
        }
    }

    /// Strip the `u32` length prefix, checking it against the bytes that follow.
    pub fn split_prefix(&self) -> Bytes {
        let raw = self.bytes();
        assert!(raw.len() >= LENGTH_PREFIX_SIZE, "vector shorter than a length prefix");
        let (prefix, body) = raw.split_at(LENGTH_PREFIX_SIZE);
        let total = u32::from_be_bytes(prefix.try_into().unwrap());
        assert_eq!(total as usize, body.len(), "length prefix does not match frame body");
        Bytes::copy_from_slice(body)
    }
}

pub fn load(name: &str) -> FrameVector {
    let path = format!("{}/tests/vectors/{name}", env!("CARGO_MANIFEST_DIR"));
    let s = fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("{path}: {e}"))
}
