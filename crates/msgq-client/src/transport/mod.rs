//! Byte-stream transport under a session.
//!
//! The session only needs `Read + Write` plus a way to switch the read side
//! between a non-blocking poll and a blocking wait with an optional deadline.

use std::io::{self, Read, Write};
use std::time::Duration;

#[cfg(test)]
pub(crate) mod mock;
pub mod unix;

/// How the next read waits for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Return immediately if nothing is buffered.
    NonBlocking,
    /// Wait for data; `None` waits forever.
    Blocking(Option<Duration>),
}

impl ReadMode {
    /// Blocking mode for a timeout given in milliseconds (0 = no deadline).
    pub fn blocking_ms(timeout_ms: u64) -> Self {
        if timeout_ms == 0 {
            ReadMode::Blocking(None)
        } else {
            ReadMode::Blocking(Some(Duration::from_millis(timeout_ms)))
        }
    }

    /// True if an expired wait in this mode is a timeout rather than "no data yet".
    pub fn has_deadline(self) -> bool {
        matches!(self, ReadMode::Blocking(Some(_)))
    }
}

/// Stream socket owned by a session.
pub trait Transport: Read + Write + Send {
    /// Configure the read side for the next read.
    fn set_read_mode(&mut self, mode: ReadMode) -> io::Result<()>;

    /// Put the write side in blocking mode so whole frames go out.
    fn set_blocking_write(&mut self) -> io::Result<()>;

    /// Shut the socket down. The session drops the transport right after.
    fn close(&mut self) -> io::Result<()>;
}
