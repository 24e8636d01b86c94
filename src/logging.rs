//! Log setup
//!
//! The terminal is owned by the UI while sift runs, so logs only go to a
//! file. Filtering follows `RUST_LOG` (default `warn`), e.g.
//! `RUST_LOG=sentence_sift::session=debug` to trace every filter and replace.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber writing to `log_file`. Without a file no
/// subscriber is installed and log events are dropped.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(log_file) = log_file else {
        return Ok(());
    };

    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .with_context(|| format!("log path {} has no file name", log_file.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let appender = tracing_appender::rolling::never(directory, file_name);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::info!(path = %log_file.display(), "logging initialised");
    Ok(())
}
