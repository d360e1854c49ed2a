//! Scripted in-memory transport for unit tests.
//!
//! Reads are served from a shared script of steps; an exhausted script reads
//! as would-block. Writes land in a shared sink.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};

use super::{ReadMode, Transport};

#[derive(Debug)]
pub(crate) enum Step {
    Data(Vec<u8>),
    Fail(io::ErrorKind),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Step>>>,
    written: Arc<Mutex<Vec<u8>>>,
    modes: Arc<Mutex<Vec<ReadMode>>>,
    closed: Arc<Mutex<bool>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_data(&self, bytes: &[u8]) {
        self.script.lock().unwrap().push_back(Step::Data(bytes.to_vec()));
    }

    pub(crate) fn push_error(&self, kind: io::ErrorKind) {
        self.script.lock().unwrap().push_back(Step::Fail(kind));
    }

    pub(crate) fn written(&self) -> Vec<u8> {
        self.written.lock().unwrap().clone()
    }

    pub(crate) fn last_mode(&self) -> Option<ReadMode> {
        self.modes.lock().unwrap().last().copied()
    }

    pub(crate) fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }
}

impl Read for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut script = self.script.lock().unwrap();
        match script.pop_front() {
            None => Err(io::ErrorKind::WouldBlock.into()),
            Some(Step::Fail(kind)) => Err(kind.into()),
            Some(Step::Data(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    script.push_front(Step::Data(data.split_off(n)));
                }
                Ok(n)
            }
        }
    }
}

impl Write for ScriptedTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Transport for ScriptedTransport {
    fn set_read_mode(&mut self, mode: ReadMode) -> io::Result<()> {
        self.modes.lock().unwrap().push(mode);
        Ok(())
    }

    fn set_blocking_write(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}
