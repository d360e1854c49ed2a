//! Top-level facade crate for msgq.
//!
//! Re-exports the protocol core and the session client so users can depend on a single crate.

pub mod core {
    pub use msgq_core::*;
}

pub mod client {
    pub use msgq_client::*;
}
