//! Unix domain stream socket transport.

use std::io;
use std::net::Shutdown;
use std::os::unix::net::UnixStream;

use super::{ReadMode, Transport};

impl Transport for UnixStream {
    fn set_read_mode(&mut self, mode: ReadMode) -> io::Result<()> {
        match mode {
            ReadMode::NonBlocking => self.set_nonblocking(true),
            ReadMode::Blocking(timeout) => {
                self.set_nonblocking(false)?;
                self.set_read_timeout(timeout)
            }
        }
    }

    fn set_blocking_write(&mut self) -> io::Result<()> {
        self.set_nonblocking(false)
    }

    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // peer already gone
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}
