//! tracing-subscriber setup for the command-line tool
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the binary (or an embedding application).

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

/// Install the global fmt subscriber, writing to stderr.
///
/// With `explicit == false`, `RUST_LOG` wins and `level` is the fallback.
/// With `explicit == true` (a level given on the command line), `level`
/// wins over the environment.
pub fn init(level: &str, explicit: bool) -> Result<(), LoggingError> {
    let filter = build_filter(level, explicit)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

fn build_filter(level: &str, explicit: bool) -> Result<EnvFilter, LoggingError> {
    let from_level = || {
        // A bare word would otherwise be taken as a target name
        if !level.contains(['=', ',']) {
            parse_level(level)?;
        }
        EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
            filter: level.to_string(),
            reason: e.to_string(),
        })
    };

    if explicit {
        from_level()
    } else {
        EnvFilter::try_from_default_env().or_else(|_| from_level())
    }
}

/// Parse a bare level name (`error`, `warn`, `info`, `debug`, `trace`, `off`)
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    if level.trim().is_empty() {
        return Err(LoggingError::InvalidLevel(level.to_string()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}
