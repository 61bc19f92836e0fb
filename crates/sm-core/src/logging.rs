//! Logging initialization using the `tracing` ecosystem.
//!
//! Both binaries call [`init_logging`] first thing in `main`. Provides:
//! - Console output (colored, human-readable)
//! - Optional file output (daily rotation via `tracing-appender`)
//! - Log level from the `RUST_LOG` env var, or the explicit default

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once; a second call panics inside
/// `tracing-subscriber` when it tries to install another global default.
///
/// # Parameters
///
/// - `default_level`: level used when `RUST_LOG` is not set (e.g. `"info"`)
/// - `log_dir`: optional directory for daily-rotating log files
/// - `file_prefix`: log file name prefix (e.g. `"sm-monitor"`)
pub fn init_logging(default_level: &str, log_dir: Option<&str>, file_prefix: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer().with_target(true).with_ansi(true);

    if let Some(dir) = log_dir {
        let file_appender = tracing_appender::rolling::daily(dir, file_prefix);
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
    }
}
