//! msgq session: one connection to the broker.
//!
//! A [`Session`] owns its socket, the local name the broker assigned during
//! the handshake, the resumable [`FrameReader`] and the queue of messages that
//! arrived before anyone asked for them.
//!
//! Concurrency note: socket, reader and queue sit behind one mutex. A blocking
//! receive that finds nothing queued keeps holding that mutex while it waits
//! on the socket (up to the configured timeout), so every other send/receive
//! on the same session stalls for that long. Use non-blocking polls or a
//! short timeout when a session is shared between threads.

mod queue;
mod reader;
mod sequence;

use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use msgq_core::error::{MsgqError, Result};
use msgq_core::protocol::frame::{encode_frame, HEADER_LENGTH_SIZE};
use msgq_core::protocol::header::PAYLOAD_LNAME;
use msgq_core::protocol::{decode_frame, Envelope, Message, Value};

use crate::config::{resolve_socket_path, SessionConfig};
use crate::transport::{ReadMode, Transport};

pub use queue::{MessageQueue, ReplyFilter};
pub use reader::{FrameReader, ReadStatus};
pub use sequence::SequenceGenerator;

/// Mutable per-connection state. `transport` is `None` once closed.
struct Inner<T> {
    transport: Option<T>,
    lname: Option<String>,
    reader: FrameReader,
    queue: MessageQueue,
}

impl<T: Transport> Inner<T> {
    fn send(&mut self, env: &Envelope, payload: Option<&Value>) -> Result<()> {
        let transport = self.transport.as_mut().ok_or_else(MsgqError::closed)?;
        let frame = encode_frame(env, payload)?;

        // write_all repeats short writes until the whole frame is out
        transport.set_blocking_write()?;
        transport.write_all(&frame)?;
        transport.flush()?;
        Ok(())
    }

    fn recv(&mut self, mode: ReadMode, filter: ReplyFilter) -> Result<Option<Message>> {
        loop {
            // queued messages are served even after close
            if let Some(msg) = self.queue.take_matching(filter) {
                return Ok(Some(msg));
            }

            let transport = self.transport.as_mut().ok_or_else(MsgqError::closed)?;
            transport.set_read_mode(mode)?;

            let body = match self.reader.read_frame(transport, mode) {
                ReadStatus::Complete(body) => body,
                ReadStatus::Pending => return Ok(None),
                ReadStatus::TimedOut => {
                    return Err(MsgqError::Timeout("recv() on msgq session timed out".into()))
                }
                ReadStatus::Closed => {
                    return Err(MsgqError::Protocol("read of 0 bytes: connection closed".into()))
                }
                ReadStatus::TooLarge(size) => {
                    // the unread body would be misread as the next length prefix
                    tracing::warn!(size, "oversized msgq frame, closing session");
                    self.close();
                    return Err(MsgqError::Protocol(format!("frame too large: {size} bytes")));
                }
                ReadStatus::Failed(err) => return Err(err.into()),
            };

            if body.len() <= HEADER_LENGTH_SIZE {
                tracing::debug!(len = body.len(), "empty msgq frame ignored");
                return Ok(None);
            }

            let msg = decode_frame(body)?;

            // header-only frames go straight to the caller
            if msg.payload.is_none() || filter.matches(&msg.envelope) {
                return Ok(Some(msg));
            }

            tracing::debug!(
                reply = ?msg.envelope.reply(),
                seq = ?msg.envelope.seq(),
                want = ?filter,
                queued = self.queue.len() + 1,
                "msgq message queued"
            );
            self.queue.push(msg);
        }
    }

    fn close(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(e) = transport.close() {
                tracing::debug!(error = %e, "msgq socket shutdown failed");
            }
        }
        self.lname = None;
    }
}

/// Client session on the msgq bus.
pub struct Session<T: Transport = UnixStream> {
    inner: Mutex<Inner<T>>,
    sequence: SequenceGenerator,
    timeout_ms: AtomicU64,
}

impl Session<UnixStream> {
    /// Connect to `socket_file` (or the resolved default) with default settings.
    pub fn connect(socket_file: Option<&Path>) -> Result<Self> {
        Self::connect_with(socket_file, &SessionConfig::default())
    }

    /// Connect and run the naming handshake.
    pub fn connect_with(socket_file: Option<&Path>, cfg: &SessionConfig) -> Result<Self> {
        let path = resolve_socket_path(socket_file, cfg.socket_file.as_deref());
        let stream = UnixStream::connect(&path).map_err(|e| {
            MsgqError::Session(format!("cannot connect to {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "msgq socket connected");
        Self::establish(stream, cfg)
    }
}

impl<T: Transport> Session<T> {
    /// Run the naming handshake over an already-connected transport.
    ///
    /// The transport is closed before any error is returned.
    pub fn establish(transport: T, cfg: &SessionConfig) -> Result<Self> {
        let session = Self {
            inner: Mutex::new(Inner {
                transport: Some(transport),
                lname: None,
                reader: FrameReader::new(cfg.max_frame_bytes),
                queue: MessageQueue::new(),
            }),
            sequence: SequenceGenerator::new(),
            timeout_ms: AtomicU64::new(cfg.timeout_ms),
        };

        match session.request_lname() {
            Ok(lname) => {
                tracing::debug!(%lname, "msgq local name received");
                session.lock()?.lname = Some(lname);
                Ok(session)
            }
            Err(e) => {
                session.close();
                Err(e)
            }
        }
    }

    fn request_lname(&self) -> Result<String> {
        self.sendmsg(&Envelope::get_lname(), None)?;
        let msg = self
            .recvmsg(false, ReplyFilter::NonReply)?
            .ok_or_else(|| MsgqError::Protocol("could not get local name".into()))?;

        msg.payload
            .as_ref()
            .and_then(|p| p.get(PAYLOAD_LNAME))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| MsgqError::Protocol("could not get local name".into()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<T>>> {
        self.inner
            .lock()
            .map_err(|_| MsgqError::Session("session lock poisoned".into()))
    }

    /// Local name assigned by the broker; `None` after close.
    pub fn lname(&self) -> Option<String> {
        self.lock().ok().and_then(|inner| inner.lname.clone())
    }

    /// Close the socket. Later sends and socket reads fail with a session error.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner
            .lock()
            .map_or(true, |inner| inner.transport.is_none())
    }

    /// Send one raw frame: `env` plus optional `payload`.
    pub fn sendmsg(&self, env: &Envelope, payload: Option<&Value>) -> Result<()> {
        self.lock()?.send(env, payload)
    }

    /// Build the envelope from the current local name and send it under one lock.
    pub(crate) fn send_routed<F>(&self, build: F, payload: Option<&Value>) -> Result<()>
    where
        F: FnOnce(Option<&str>) -> Envelope,
    {
        let mut inner = self.lock()?;
        let env = build(inner.lname.as_deref());
        inner.send(&env, payload)
    }

    /// Receive one message.
    ///
    /// Checks the queue first, then reads from the socket. With `nonblock`
    /// set, `Ok(None)` means nothing is available yet; otherwise the call
    /// waits up to [`timeout_ms`](Self::timeout_ms). Messages that do not
    /// match `filter` are queued for later calls.
    pub fn recvmsg(&self, nonblock: bool, filter: ReplyFilter) -> Result<Option<Message>> {
        let mode = if nonblock {
            ReadMode::NonBlocking
        } else {
            ReadMode::blocking_ms(self.timeout_ms())
        };
        self.lock()?.recv(mode, filter)
    }

    /// Next correlation number.
    pub(crate) fn next_sequence(&self) -> u64 {
        self.sequence.next()
    }

    pub fn has_queued_msgs(&self) -> bool {
        self.lock().map_or(false, |inner| !inner.queue.is_empty())
    }

    /// Set the blocking-receive timeout in milliseconds (0 = wait forever).
    pub fn set_timeout(&self, milliseconds: u64) {
        self.timeout_ms.store(milliseconds, Ordering::Relaxed);
    }

    /// Blocking-receive timeout in milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.load(Ordering::Relaxed)
    }
}
