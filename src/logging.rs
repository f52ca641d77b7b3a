use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_FILE_PREFIX};

/// Keeps the non-blocking file writer alive. Dropping it flushes pending lines,
/// so `main` holds it until the run is over.
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Initializes console logging, plus a daily-rotated JSON log file when
/// `log_dir` is given.
pub fn init_logging(log_dir: Option<&Path>) -> LoggingGuard {
    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let _ = fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    // Respect RUST_LOG if set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    LoggingGuard { _file: file_guard }
}
