//! File-based tracing setup. The terminal belongs to the TUI, so nothing is
//! written to stdout.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{ConfigError, Settings};

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "SWARMCTL_LOG";

/// Log file name prefix; the appender adds the date.
pub const LOG_FILE: &str = "swarmctl.log";

/// Installs the global subscriber writing to a daily log file.
///
/// The returned guard flushes pending lines on drop and must be held for
/// the life of the program.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(settings: &Settings) -> Result<WorkerGuard, ConfigError> {
    fs::create_dir_all(&settings.log_dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, &settings.log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!(dir = %settings.log_dir.display(), "logger initialised");
    Ok(guard)
}
