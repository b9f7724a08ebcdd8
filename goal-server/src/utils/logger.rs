//! Logging Infrastructure
//!
//! Structured logging setup for development and production.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with optional daily-rolling file output
///
/// `log_level` is an `EnvFilter` directive such as `info` or
/// `goal_server=debug,tower_http=info`. Falls back to stdout when `log_dir`
/// does not exist. `with_source` adds file and line to every event. Safe to
/// call more than once: later calls are ignored.
pub fn init_logger_with_file(
    log_level: Option<&str>,
    log_dir: Option<&str>,
    with_source: bool,
) {
    let filter = EnvFilter::try_new(log_level.unwrap_or("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(with_source)
        .with_line_number(with_source)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "goal-server");
            let _ = subscriber.with_writer(file_appender).try_init();
            return;
        }
        eprintln!("log dir {} not found, logging to stdout", dir);
    }

    let _ = subscriber.try_init();
}
