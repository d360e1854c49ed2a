use std::path::PathBuf;

use serde::Deserialize;
use msgq_core::error::{MsgqError, Result};

/// Default blocking-receive timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 4000;
/// Default upper bound on a single frame: anything a `u32` length prefix can announce.
pub const DEFAULT_MAX_FRAME_BYTES: usize = u32::MAX as usize;

const MAX_TIMEOUT_MS: u64 = 3_600_000;
const FRAME_BYTES_RANGE: std::ops::RangeInclusive<usize> = 64..=DEFAULT_MAX_FRAME_BYTES;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub session: SessionConfig,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MsgqError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.session.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Socket path; falls back to the environment, then the compiled-in default.
    #[serde(default)]
    pub socket_file: Option<PathBuf>,

    /// Blocking-receive timeout; 0 blocks forever.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Frames announcing a larger body close the session.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            socket_file: None,
            timeout_ms: default_timeout_ms(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(MsgqError::Config(format!(
                "session.timeout_ms must be at most {MAX_TIMEOUT_MS}"
            )));
        }
        if !FRAME_BYTES_RANGE.contains(&self.max_frame_bytes) {
            return Err(MsgqError::Config(format!(
                "session.max_frame_bytes must be between {} and {}",
                FRAME_BYTES_RANGE.start(),
                FRAME_BYTES_RANGE.end()
            )));
        }
        if matches!(&self.socket_file, Some(p) if p.as_os_str().is_empty()) {
            return Err(MsgqError::Config("session.socket_file must not be empty".into()));
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
fn default_max_frame_bytes() -> usize {
    DEFAULT_MAX_FRAME_BYTES
}
