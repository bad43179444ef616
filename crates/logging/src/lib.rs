//! Logging initialization for the classgraph binary.
//!
//! Two modes are supported:
//! - Cli: logs to STDERR, keeping STDOUT for the extracted trees and query results.
//! - CliWithFile: logs to STDERR and to a rolling file in the given directory.
//!
//! The log file is rolled over when it reaches 5 MB. Rotated logs are
//! compressed. The maximum number of rotated logs is 20.

use anyhow::Result;
use file_rotate::{ContentLimit, FileRotate, compression::Compression, suffix::AppendCount};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt::writer::MakeWriterExt};

pub const LOG_FILE_NAME: &str = "classgraph.log";

pub enum LogMode {
    Cli,
    CliWithFile(PathBuf),
}

/// Guard that keeps background logging workers alive.
pub struct LoggingGuards {
    _guards: Vec<WorkerGuard>,
}

pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

pub fn rotating_log_file(log_dir: &Path) -> Result<FileRotate<AppendCount>> {
    std::fs::create_dir_all(log_dir)?;
    Ok(FileRotate::new(
        log_dir.join(LOG_FILE_NAME),
        AppendCount::new(20),
        ContentLimit::Bytes(5 * 1024 * 1024),
        Compression::OnRotate(1),
        None,
    ))
}

pub fn init(mode: LogMode, verbose: bool) -> Result<Option<LoggingGuards>> {
    let filter = env_filter(verbose);

    match mode {
        LogMode::Cli => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
            Ok(None)
        }
        LogMode::CliWithFile(log_dir) => {
            let writer = rotating_log_file(&log_dir)?;

            let (file_non_blocking, file_guard) = tracing_appender::non_blocking(writer);
            // Drop lines over the buffer limit rather than block on a slow stderr consumer
            let (stderr_non_blocking, stderr_guard) = NonBlockingBuilder::default()
                .lossy(true)
                .buffered_lines_limit(10_000)
                .finish(std::io::stderr());

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(
                    file_non_blocking
                        .with_max_level(tracing::Level::INFO)
                        .and(stderr_non_blocking),
                )
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

            Ok(Some(LoggingGuards {
                _guards: vec![file_guard, stderr_guard],
            }))
        }
    }
}
