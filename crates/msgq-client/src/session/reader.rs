//! Resumable frame reader.
//!
//! Reads exactly one frame body (the bytes after the `u32` length prefix)
//! from a stream that may hand out short reads or report would-block at any
//! point. Progress lives in [`FrameReader`] between calls, so a non-blocking
//! caller can poll repeatedly and pick up exactly where the last call stopped.
//!
//! What happens to partial progress depends on how a read stops:
//!
//! | outcome                         | progress  | status            |
//! |---------------------------------|-----------|-------------------|
//! | would-block (no deadline)       | kept      | `Pending`         |
//! | deadline expired                | discarded | `TimedOut`        |
//! | interrupted                     | discarded | `Pending`         |
//! | zero-byte read (peer closed)    | kept      | `Closed`          |
//! | length prefix above the limit   | discarded | `TooLarge`        |
//! | any other I/O error             | discarded | `Failed(err)`     |
//!
//! After `TooLarge` the announced body is still unread on the stream, so the
//! stream is out of step with frame boundaries and must not be read again.

use std::io::{self, Read};

use bytes::Bytes;
use msgq_core::protocol::frame::LENGTH_PREFIX_SIZE;

use crate::transport::ReadMode;

/// Result of one [`FrameReader::read_frame`] call.
#[derive(Debug)]
pub enum ReadStatus {
    /// A whole frame body.
    Complete(Bytes),
    /// Nothing (more) to read right now.
    Pending,
    /// The blocking deadline expired.
    TimedOut,
    /// The peer closed the stream.
    Closed,
    /// The length prefix announced a frame above the configured limit.
    TooLarge(usize),
    /// Any other I/O error.
    Failed(io::Error),
}

#[derive(Debug)]
enum Phase {
    Idle,
    Length {
        buf: [u8; LENGTH_PREFIX_SIZE],
        filled: usize,
    },
    Body {
        buf: Vec<u8>,
        filled: usize,
    },
}

/// Why a fill stopped short.
enum Stop {
    Closed,
    Io(io::Error),
}

/// Per-session continuation state for partial frame reads.
#[derive(Debug)]
pub struct FrameReader {
    phase: Phase,
    max_frame_bytes: usize,
}

impl FrameReader {
    pub fn new(max_frame_bytes: usize) -> Self {
        Self {
            phase: Phase::Idle,
            max_frame_bytes,
        }
    }

    /// True while a frame has been started but not finished.
    pub fn in_progress(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Bytes accumulated for the current phase.
    pub fn buffered(&self) -> usize {
        match &self.phase {
            Phase::Idle => 0,
            Phase::Length { filled, .. } | Phase::Body { filled, .. } => *filled,
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Read one frame body from `src`. `mode` must match how `src` was configured.
    pub fn read_frame<R: Read + ?Sized>(&mut self, src: &mut R, mode: ReadMode) -> ReadStatus {
        loop {
            let stop = match &mut self.phase {
                Phase::Idle => {
                    self.phase = Phase::Length {
                        buf: [0; LENGTH_PREFIX_SIZE],
                        filled: 0,
                    };
                    continue;
                }
                Phase::Length { buf, filled } => match fill(src, buf, filled) {
                    Ok(()) => {
                        let size = u32::from_be_bytes(*buf) as usize;
                        if size > self.max_frame_bytes {
                            self.reset();
                            return ReadStatus::TooLarge(size);
                        }
                        self.phase = Phase::Body {
                            buf: vec![0; size],
                            filled: 0,
                        };
                        continue;
                    }
                    Err(stop) => stop,
                },
                Phase::Body { buf, filled } => match fill(src, buf, filled) {
                    Ok(()) => {
                        let body = std::mem::take(buf);
                        self.reset();
                        return ReadStatus::Complete(Bytes::from(body));
                    }
                    Err(stop) => stop,
                },
            };
            return self.stopped(stop, mode);
        }
    }

    fn stopped(&mut self, stop: Stop, mode: ReadMode) -> ReadStatus {
        let err = match stop {
            Stop::Closed => return ReadStatus::Closed,
            Stop::Io(err) => err,
        };
        match err.kind() {
            // SO_RCVTIMEO expiry shows up as EAGAIN on Linux
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut if mode.has_deadline() => {
                self.reset();
                ReadStatus::TimedOut
            }
            io::ErrorKind::WouldBlock => ReadStatus::Pending,
            io::ErrorKind::Interrupted => {
                self.reset();
                ReadStatus::Pending
            }
            _ => {
                self.reset();
                ReadStatus::Failed(err)
            }
        }
    }
}

/// Read into `buf[*filled..]` until full, one short read at a time.
fn fill<R: Read + ?Sized>(src: &mut R, buf: &mut [u8], filled: &mut usize) -> Result<(), Stop> {
    while *filled < buf.len() {
        match src.read(&mut buf[*filled..]) {
            Ok(0) => return Err(Stop::Closed),
            Ok(n) => *filled += n,
            Err(e) => return Err(Stop::Io(e)),
        }
    }
    Ok(())
}
