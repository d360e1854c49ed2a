//! msgq client library.
//!
//! Session engine for the msgq bus: socket transport, resumable frame reads,
//! reply correlation with an out-of-order queue, the naming handshake, and
//! the group pub/sub calls built on top. Consumed by the `msgq-tap` binary
//! and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod group;
pub mod session;
pub mod transport;

pub use config::{ClientConfig, SessionConfig};
pub use group::SendOptions;
pub use session::{ReplyFilter, Session};
pub use transport::{ReadMode, Transport};
