//! Logging setup for the schedule service.
//!
//! All crates log through `tracing`; the binary calls [`init_with_config`] once at startup.
//! `RUST_LOG` takes precedence over the configured level.

use schedule_config::LoggingConfig;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter directive when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LEVEL: &str = "info";

/// Initialize the tracing subscriber.
///
/// Logs go to stdout with target, file and line information. When `logging.directory` is
/// configured, a second non-ANSI layer writes to a daily rolling `schedule.log` in that
/// directory; the returned guard must be kept alive for the lifetime of the process so
/// buffered lines are flushed.
///
/// Calling this more than once is harmless: the second global subscriber is rejected
/// and nothing is logged about it.
pub fn init_with_config(logging: Option<&LoggingConfig>) -> Option<WorkerGuard> {
    let level = logging
        .and_then(|l| l.level.clone())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let (file_layer, guard) = match logging.and_then(|l| l.directory.as_deref()) {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "schedule.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(file_layer)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
    guard
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
