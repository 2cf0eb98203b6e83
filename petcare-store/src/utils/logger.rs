//! Logging Infrastructure
//!
//! tracing-subscriber fmt output to stdout, or to a daily rolling file when a
//! log directory is given.

use std::path::Path;

/// Initialize the logger with defaults
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON lines and file output.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|path| path.exists())
        .and_then(|path| path.to_str())
        .map(|dir| tracing_appender::rolling::daily(dir, "petcare"));

    let result = match (file_appender, json.unwrap_or(false)) {
        (Some(appender), true) => subscriber.json().with_writer(appender).try_init(),
        (Some(appender), false) => subscriber.with_ansi(false).with_writer(appender).try_init(),
        (None, true) => subscriber.json().try_init(),
        (None, false) => subscriber.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
