//! File logging through `tracing`.
//!
//! The TUI owns stdout/stderr, so every log line goes to
//! `${GYMTRACK_HOME}/logs/<file>` instead. `GYMTRACK_LOG` overrides the
//! configured filter using the usual `EnvFilter` directive syntax.
//!
//! Credentials are never logged: emails may appear, passwords and tokens
//! must not.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogConfig, paths};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "GYMTRACK_LOG";

/// Keeps the background log writer alive. Drop it last, on shutdown.
pub struct LogGuard {
    _guard: WorkerGuard,
    path: PathBuf,
}

impl LogGuard {
    /// Path of the file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Builds the filter from `GYMTRACK_LOG`, falling back to the configured level.
fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(config.level.trim()))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber, writing to the logs directory.
///
/// # Errors
/// Returns an error if the logs directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<LogGuard> {
    init_in(&paths::logs_dir(), config)
}

/// Installs the global subscriber, writing into `dir`.
///
/// # Errors
/// Returns an error if `dir` cannot be created or a global subscriber is
/// already installed.
pub fn init_in(dir: &Path, config: &LogConfig) -> Result<LogGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_name = if config.file.trim().is_empty() {
        "gymtrack.log"
    } else {
        config.file.trim()
    };
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard {
        _guard: guard,
        path: dir.join(file_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        let config = LogConfig {
            level: "not a [valid directive".to_string(),
            ..Default::default()
        };
        // Must not panic; falls back to a usable filter.
        let filter = build_filter(&config);
        assert!(!filter.to_string().is_empty());
    }
}
