//! msgq-tap: subscribe to groups and print every message as one JSON line.
//!
//! Logging goes to stderr through `RUST_LOG` (e.g. `RUST_LOG=msgq_client=debug`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use msgq_client::{config, ReplyFilter, Session, SessionConfig};
use msgq_core::error::{MsgqError, Result};
use msgq_core::protocol::header::INSTANCE_WILDCARD;
use msgq_core::protocol::{Envelope, Value};

#[derive(Debug, Parser)]
#[command(name = "msgq-tap", about = "Print messages arriving on msgq groups")]
struct Args {
    /// Socket path (overrides config and MSGQ_SOCKET_FILE).
    #[arg(long)]
    socket: Option<PathBuf>,

    /// YAML client config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Group to subscribe to; repeatable.
    #[arg(long = "group", required = true)]
    groups: Vec<String>,

    #[arg(long, default_value = INSTANCE_WILDCARD)]
    instance: String,

    /// Exit after this many messages.
    #[arg(long)]
    count: Option<usize>,

    /// Blocking-receive timeout; 0 waits forever.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Serialize)]
struct TapLine<'a> {
    envelope: &'a Envelope,
    payload: Option<&'a Value>,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind().as_str(), "msgq-tap failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => config::load_from_file(path)?.session,
        None => SessionConfig::default(),
    };
    if let Some(ms) = args.timeout_ms {
        cfg.timeout_ms = ms;
        cfg.validate()?;
    }

    let session = Session::connect_with(args.socket.as_deref(), &cfg)?;
    tracing::info!(lname = ?session.lname(), groups = ?args.groups, "msgq-tap listening");

    for group in &args.groups {
        session.group_subscribe(group, Some(&args.instance))?;
    }

    let res = tap(&session, args.count);
    session.close();
    res
}

fn tap(session: &Session, count: Option<usize>) -> Result<()> {
    let stdout = io::stdout();
    let mut seen = 0usize;

    while count.map_or(true, |n| seen < n) {
        let (payload, envelope) = match session.group_recvmsg(false, ReplyFilter::NonReply) {
            Ok(pair) => pair,
            Err(e) if e.is_timeout() => {
                tracing::trace!("no traffic");
                continue;
            }
            Err(e) => return Err(e),
        };
        let Some(envelope) = envelope else { continue };

        let line = serde_json::to_string(&TapLine {
            envelope: &envelope,
            payload: payload.as_ref(),
        })
        .map_err(|e| MsgqError::Session(format!("encode failed: {e}")))?;

        let mut out = stdout.lock();
        writeln!(out, "{line}")?;
        out.flush()?;
        seen += 1;
    }
    Ok(())
}
