//! Tracing bootstrap.
//!
//! Everything matching the filter goes to a daily log file under the
//! config directory. Stderr only shows warnings unless `--verbose` is set,
//! so command output stays readable.

use anyhow::Result;
use orienta_core::config::ClientConfig;
use orienta_infrastructure::OrientaPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "orienta.log";

/// `RUST_LOG` wins over the configured level.
fn build_filter(config: &ClientConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Keep the returned guard alive until
/// exit so buffered file output is flushed.
pub fn init(
    config: &ClientConfig,
    paths: &OrientaPaths,
    verbose: bool,
) -> Result<Option<WorkerGuard>> {
    let stderr_filter = if verbose {
        EnvFilter::new("warn,orienta=debug")
    } else {
        EnvFilter::new("warn")
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match paths.ensure_logs_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(build_filter(config));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e}");
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
