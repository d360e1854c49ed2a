//! Value codec for envelope and payload segments.
//!
//! Segments are JSON. Decode failures surface as `MsgqError::Session` rather
//! than raw serializer errors.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{MsgqError, Result};

/// Serialize one segment.
pub fn to_wire<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| MsgqError::Session(format!("encode failed: {e}")))
}

/// Deserialize one segment.
pub fn from_wire<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| MsgqError::Session(format!("decode failed: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::Value;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn malformed_bytes_are_a_session_error() {
        let err = from_wire::<Value>(b"{\"a\":").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Session);
    }
}
