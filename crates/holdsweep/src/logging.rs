use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the log file written next to the sweep outputs
pub const LOG_FILE_NAME: &str = "holdsweep.log";

fn env_filter(level: &str) -> EnvFilter {
    let default_filter = format!("holdsweep={level},holdsweep_core={level}");
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter))
}

/// Initialize logging to stderr, and to `{log_dir}/holdsweep.log` when a
/// directory is given.
///
/// The log level can be controlled via the `level` parameter or the
/// `RUST_LOG` environment variable. The returned guard flushes the file
/// writer on drop and must be held until the program exits.
pub fn init_logging(
    level: &str,
    log_dir: Option<&Path>,
) -> color_eyre::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    match log_dir {
        Some(dir) => tracing::info!(
            "holdsweep logging initialized (log_path={})",
            dir.join(LOG_FILE_NAME).display()
        ),
        None => tracing::debug!("holdsweep logging initialized"),
    }
    Ok(guard)
}
