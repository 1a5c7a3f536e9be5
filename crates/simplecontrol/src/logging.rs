//! Diagnostics on stderr. Stdout carries frame reports only, so piped
//! output stays parseable whatever the log level.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

use crate::exit::{CliError, CliResult, INTERNAL};

/// Environment fallback for `--log-level`.
pub const LOG_LEVEL_ENV: &str = "SIMPLECONTROL_LOG";

/// Environment fallback for `--log-format`.
pub const LOG_FORMAT_ENV: &str = "SIMPLECONTROL_LOG_FORMAT";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One human-readable line per event.
    Text,
    /// One JSON object per event, for log collectors on the host side of a link.
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    /// Invalid frames seen by `decode` and `read`.
    Warn,
    /// Per-stream totals from `read`.
    Info,
    /// Every encoded or decoded value.
    Debug,
    /// Per-call codec internals.
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the global stderr subscriber.
///
/// Fails if a subscriber is already installed for this process.
pub fn init_logging(format: LogFormat, level: LogLevel) -> CliResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(false)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| CliError::new(INTERNAL, format!("logging setup failed: {err}")))
}
