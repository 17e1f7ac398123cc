//! File logging
//!
//! The terminal belongs to the UI, so logs only go to a file.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "hangman.log";

/// Install the global subscriber writing to `<dir>/hangman.log`.
///
/// `RUST_LOG` filters; the default level is info. Keep the returned guard
/// alive for the life of the process or buffered lines are lost.
pub fn setup(log_dir: Option<&Path>) -> anyhow::Result<(WorkerGuard, PathBuf)> {
    let dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_dir(),
    };
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!(log_file = %dir.join(LOG_FILE).display(), "logging initialized");
    Ok((guard, dir))
}

/// Platform cache directory, falling back to the working directory.
pub fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "hangman")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
