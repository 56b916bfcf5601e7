use crate::error::ConfigError;
use crate::settings::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// Console output goes to stderr so machine-readable stdout stays clean.
/// `RUST_LOG` takes precedence over the configured level. When a log directory
/// is configured the returned guard must be held until shutdown, or buffered
/// file output is lost.
pub fn init_tracing(settings: &LoggingConfig) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level).map_err(|e| {
            ConfigError::ValidationError(format!("invalid log level '{}': {e}", settings.level))
        })?,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(settings.ansi)
        .with_target(true);

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).map_err(|e| {
                ConfigError::Logging(format!(
                    "could not create log directory {}: {e}",
                    directory.display()
                ))
            })?;
            let appender = tracing_appender::rolling::daily(directory, &settings.file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unparsable_level() {
        // RUST_LOG overrides the configured level.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let settings = LoggingConfig {
            level: "wagerlens=loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            init_tracing(&settings),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
