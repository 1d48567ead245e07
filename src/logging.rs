use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry::Registry};

const LOG_FILE_PREFIX: &str = "invpick.log";
const LOG_LEVEL_ENV: &str = "INVPICK_LOG";

/// Sets up file logging into `log_dir` with daily rotation.
///
/// The terminal belongs to the UI, so nothing is logged when no directory is
/// configured. The level comes from `INVPICK_LOG` (default `info`). Keep the
/// returned guard alive until exit so buffered lines get flushed.
pub fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(log_dir) = log_dir else {
        return Ok(None);
    };

    fs::create_dir_all(log_dir).with_context(|| {
        format!("Failed to create log directory {}", log_dir.display())
    })?;

    let env_filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard) =
        tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    Registry::default()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_directory_means_no_logging() {
        assert!(init_logging(None).unwrap().is_none());
    }
}
