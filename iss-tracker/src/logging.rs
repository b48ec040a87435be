use anyhow::Context;
use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

/// Keeps the file writer flushing until dropped
#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

pub fn init_logging(
    log_dir: impl AsRef<Path>,
    prefix: &str,
    level: &str,
    retention: Duration,
) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref();

    let (level, invalid) = match level {
        "trace" | "debug" | "info" | "warn" | "error" => (level, false),
        _ => ("info", true),
    };

    let builder = EnvFilter::builder().with_default_directive(
        level
            .parse::<Directive>()
            .with_context(|| format!("Invalid log level '{}'", level))?,
    );

    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let console_filter = builder.clone().parse_lossy(&rust_log);
    let file_filter = builder.parse_lossy(&rust_log);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir)
        .with_context(|| format!("Failed to create log appender in {}", log_dir.display()))?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    // stdout is reserved for the pass report
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if invalid {
        tracing::warn!("Invalid log level, defaulting to 'info'");
    }

    match cleanup_old_logs(log_dir, prefix, retention) {
        Ok(0) => {}
        Ok(removed) => tracing::debug!("Removed {} old log files", removed),
        Err(e) => tracing::warn!("Failed to delete old log file: {}", e),
    }

    Ok(LoggerGuard(guard))
}

/// Delete `<prefix>*.log` files older than `max_age`. Returns how many went.
fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration) -> std::io::Result<usize> {
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".log"));
        if !is_ours {
            continue;
        }

        // files with no usable mtime are left alone
        let age = fs::metadata(&path)?
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok());
        if age.is_some_and(|age| age > max_age) {
            fs::remove_file(&path)?;
            tracing::info!("Old log file deleted: {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}
