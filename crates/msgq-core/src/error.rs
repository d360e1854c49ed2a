//! Shared error type across msgq crates.

use std::io;

use thiserror::Error;

/// Stable error kinds callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or oversized frame, unexpected close, failed handshake.
    Protocol,
    /// Generic network fault. Part of the taxonomy, not raised by the session itself.
    Network,
    /// Closed session, decode failure, or wrapped connect failure.
    Session,
    /// Blocking receive deadline exceeded.
    Timeout,
    /// Raw low-level I/O error passed through unwrapped.
    Io,
    /// Invalid client configuration.
    Config,
}

impl ErrorKind {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Protocol => "PROTOCOL_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Session => "SESSION_ERROR",
            ErrorKind::Timeout => "SESSION_TIMEOUT",
            ErrorKind::Io => "IO",
            ErrorKind::Config => "CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MsgqError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum MsgqError {
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("session error: {0}")]
    Session(String),
    #[error("session timeout: {0}")]
    Timeout(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Config(String),
}

impl MsgqError {
    /// Map to a stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MsgqError::Protocol(_) => ErrorKind::Protocol,
            MsgqError::Network(_) => ErrorKind::Network,
            MsgqError::Session(_) => ErrorKind::Session,
            MsgqError::Timeout(_) => ErrorKind::Timeout,
            MsgqError::Io(_) => ErrorKind::Io,
            MsgqError::Config(_) => ErrorKind::Config,
        }
    }

    /// Operation on a session that has already been closed.
    pub fn closed() -> Self {
        MsgqError::Session("session has been closed".into())
    }

    /// True if a blocking receive ran into its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, MsgqError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_pass_through_unwrapped() {
        let err = MsgqError::from(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.to_string(), "reset");
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(MsgqError::closed().kind().as_str(), "SESSION_ERROR");
        assert_eq!(MsgqError::Timeout("t".into()).kind().as_str(), "SESSION_TIMEOUT");
        assert!(MsgqError::Timeout("t".into()).is_timeout());
        assert!(!MsgqError::Protocol("p".into()).is_timeout());
    }
}
