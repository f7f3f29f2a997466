use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "book-connect.log";

/// Directory the log file is written to: the platform cache dir, or the
/// working directory when no home directory can be found.
pub fn log_dir() -> PathBuf {
    crate::config::project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `RUST_LOG` wins over the configured level, which wins over `info`.
fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")))
}

/// Send `tracing` output to a file, since the terminal belongs to the UI.
///
/// Returns the writer guard; logs are flushed when it is dropped. Failure
/// to set up logging is never fatal.
pub fn init(dir: &Path, level: Option<&str>) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }

    let file_appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Some(guard),
        // A subscriber is already installed; dropping the guard stops our writer.
        Err(_) => None,
    }
}
