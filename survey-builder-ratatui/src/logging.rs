//! Log setup for the editor binary.
//!
//! The terminal belongs to the form while the editor runs, so logs go to a
//! daily-rotated `survey-builder.log` in the log directory instead.
//!
//! Filtering follows `RUST_LOG`:
//! - `RUST_LOG=debug` - every edit the store applies
//! - `RUST_LOG=survey_builder=debug,survey_builder_ratatui=info` - scoped filtering

use std::{fs, io, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name prefix of the rotated log files.
pub const LOG_FILE_NAME: &str = "survey-builder.log";

/// Install the file logger. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(log_dir: &Path) -> io::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    Ok(guard)
}
