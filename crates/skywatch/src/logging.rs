//! File logging.
//!
//! The terminal is owned by the UI, so events go to a daily log file under
//! the platform data directory. Filter with `SKYWATCH_LOG` (default `info`).

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "SKYWATCH_LOG";

/// Install the global subscriber.
///
/// Returns a guard that must be kept alive for the duration of the program,
/// or `None` if logging could not be set up.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(&log_dir, "skywatch.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .try_init()
        .ok()?;

    Some(guard)
}

fn log_directory() -> Option<PathBuf> {
    ProjectDirs::from("", "", "skywatch").map(|dirs| dirs.data_local_dir().join("logs"))
}
