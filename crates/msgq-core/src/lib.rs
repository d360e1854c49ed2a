//! msgq core: transport-agnostic protocol primitives and error types.
//!
//! This crate defines the wire-level contracts of the msgq bus (envelope
//! headers, value codec, length-prefixed framing) and the error surface shared
//! by the session client and tooling. It carries no socket or runtime
//! dependencies so it can be reused by a broker or test harness.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MsgqError`/`Result` so a malformed
//! frame from the socket never takes the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorKind, MsgqError, Result};
pub use protocol::{Envelope, Message, Value};
