//! CLI entry point for one-shot agenda computations.
//!
//! # Responsibility
//! - Load a meeting snapshot from disk and print the derived agenda view.
//! - Own the only system clock read in the workspace (`--now` default).

use agenda_core::{
    core_version, default_log_level, init_logging, parse_instant, AgendaService, EngineOptions,
    LogLevel, Meeting, MissingSchedule, Topic,
};
use chrono::{DateTime, Utc};
use clap::Parser;
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Compute topic times, scheduled-end overrun and the live countdown for a
/// meeting snapshot.
#[derive(Debug, Parser)]
#[command(name = "agenda", version, about)]
struct Args {
    /// JSON file holding `{ "meeting": {...}, "topics": [...] }`.
    snapshot: PathBuf,

    /// Clock sample (RFC 3339). Defaults to the current time.
    #[arg(long, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    /// Hide the scheduled-end marker when the meeting has no scheduled duration.
    #[arg(long)]
    suppress_missing_schedule: bool,

    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,

    #[arg(long, default_value_t = default_log_level())]
    log_level: LogLevel,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    meeting: Meeting,
    #[serde(default)]
    topics: Vec<Topic>,
}

#[derive(Debug)]
enum CliError {
    Logging(String),
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Decode { path, source } => {
                write!(f, "invalid snapshot `{}`: {source}", path.display())
            }
            Self::Encode(source) => write!(f, "failed to encode view: {source}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } | Self::Encode(source) => Some(source),
        }
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("agenda: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if let Some(log_dir) = &args.log_dir {
        init_logging(args.log_level, log_dir).map_err(CliError::Logging)?;
    }

    let raw = std::fs::read_to_string(&args.snapshot).map_err(|source| CliError::Read {
        path: args.snapshot.clone(),
        source,
    })?;
    let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|source| CliError::Decode {
        path: args.snapshot.clone(),
        source,
    })?;

    let options = EngineOptions {
        missing_schedule: if args.suppress_missing_schedule {
            MissingSchedule::SuppressMarker
        } else {
            MissingSchedule::TreatAsZero
        },
    };
    let now = args.now.unwrap_or_else(Utc::now);
    info!(
        "event=cli_run module=cli status=start version={} topics={} now={}",
        core_version(),
        snapshot.topics.len(),
        now.to_rfc3339()
    );

    let view = AgendaService::new(options).view(&snapshot.meeting, &snapshot.topics, now);
    let rendered = if args.compact {
        serde_json::to_string(&view)
    } else {
        serde_json::to_string_pretty(&view)
    }
    .map_err(CliError::Encode)?;

    println!("{rendered}");
    Ok(())
}
