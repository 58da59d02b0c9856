//! File logging for the terminal host.
//!
//! The terminal is owned by the UI, so logs always go to a file.
//! Filter priority: `PAINTFLASH_LOG`, then `RUST_LOG`, then `info`.
//! Default location: `<tmp>/paintflash-<pid>.log`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Must be held for the lifetime of the program; dropping it flushes the
/// background writer.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

pub fn init(log_file: Option<PathBuf>) -> Result<LogGuard> {
    let log_file = log_file.unwrap_or_else(default_log_file);
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = log_file
        .file_name()
        .context("log file path has no file name")?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, file_guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file,
    })
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env("PAINTFLASH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join(format!("paintflash-{}.log", std::process::id()))
}
