//! Logging startup
//!
//! Console logging is always on. When a log directory is configured, a
//! daily-rolling `aeris.log` file is written as well; the returned worker
//! guard must stay alive for the lifetime of the process.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Logging configuration for the node
#[derive(Clone, Debug, Default)]
pub struct LoggingConfig {
    /// Directory for the rolling log file; `None` disables file logging
    pub dir: Option<PathBuf>,
    /// Default level filter when `RUST_LOG` is not set
    pub level: String,
}

/// Initialize the tracing subscriber.
///
/// Returns the file appender guard when file logging is enabled.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console_layer = fmt::layer().with_target(true);

    match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "aeris.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);

            let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();

            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_disables_file_logging() {
        let config = LoggingConfig::default();
        assert!(config.dir.is_none());
    }
}
