//! Client config loader (strict parsing) and socket path resolution.

pub mod schema;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use msgq_core::error::{MsgqError, Result};

pub use schema::{ClientConfig, SessionConfig, DEFAULT_MAX_FRAME_BYTES, DEFAULT_TIMEOUT_MS};

/// Environment variable overriding the socket path.
pub const SOCKET_FILE_ENV: &str = "MSGQ_SOCKET_FILE";

/// Socket path used when nothing else is configured. Set
/// `MSGQ_DEFAULT_SOCKET_FILE` at build time to change it.
pub const DEFAULT_SOCKET_FILE: &str = match option_env!("MSGQ_DEFAULT_SOCKET_FILE") {
    Some(path) => path,
    None => "/usr/local/var/msgq/msgq_socket",
};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| MsgqError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| MsgqError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Pick the socket path: explicit argument, then config, then
/// `MSGQ_SOCKET_FILE`, then [`DEFAULT_SOCKET_FILE`].
pub fn resolve_socket_path(explicit: Option<&Path>, configured: Option<&Path>) -> PathBuf {
    resolve_with_env(explicit, configured, std::env::var_os(SOCKET_FILE_ENV))
}

fn resolve_with_env(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    env: Option<OsString>,
) -> PathBuf {
    if let Some(p) = explicit.or(configured) {
        return p.to_path_buf();
    }
    match env {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => PathBuf::from(DEFAULT_SOCKET_FILE),
    }
}
