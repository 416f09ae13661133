///! Logging configuration module
///! Structured logging to the console with an optional rolling log file

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "cloudsim.log";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,              // trace, debug, info, warn, error
    pub file_path: Option<PathBuf>, // log directory; console only when unset
    pub rotation: LogRotation,
    pub json_format: bool,          // JSON console output
}

/// Log rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            rotation: LogRotation::Daily,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber.
    ///
    /// Returns the file writer guard when file logging is enabled; dropping it
    /// flushes and stops the background writer.
    pub fn init(&self) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
        // RUST_LOG wins over the configured level
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))?;

        let console_layer = if self.json_format {
            fmt::layer()
                .with_target(true)
                .with_writer(io::stderr)
                .json()
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(true)
                .with_writer(io::stderr)
                .boxed()
        };

        let guard = if let Some(ref path) = self.file_path {
            let file_appender = match self.rotation {
                LogRotation::Hourly => rolling::hourly(path, LOG_FILE_NAME),
                LogRotation::Daily => rolling::daily(path, LOG_FILE_NAME),
                LogRotation::Never => rolling::never(path, LOG_FILE_NAME),
            };
            let (writer, guard) = non_blocking(file_appender);

            let file_layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .json()
                .with_writer(writer);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()?;
            Some(guard)
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .try_init()?;
            None
        };

        tracing::debug!("Logging initialized - level: {}", self.level);

        Ok(guard)
    }
}

/// Log a resource operation with context
#[macro_export]
macro_rules! log_resource_operation {
    ($kind:expr, $op:expr, $id:expr, $name:expr) => {
        tracing::info!(
            kind = $kind,
            operation = $op,
            resource_id = $id,
            name = $name,
            "Resource operation"
        )
    };
    ($kind:expr, $op:expr, $id:expr, $name:expr, $($key:ident = $value:expr),+) => {
        tracing::info!(
            kind = $kind,
            operation = $op,
            resource_id = $id,
            name = $name,
            $($key = $value),+,
            "Resource operation"
        )
    };
}

/// Log a rejected resource operation
#[macro_export]
macro_rules! log_rejected_operation {
    ($kind:expr, $op:expr, $name:expr, $err:expr) => {
        tracing::warn!(
            kind = $kind,
            operation = $op,
            name = $name,
            error = %$err,
            "Resource operation rejected"
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.file_path.is_none());
        assert_eq!(config.rotation, LogRotation::Daily);
    }

    #[test]
    fn test_rotation_from_toml() {
        let config: LoggingConfig = toml::from_str(
            r#"
            level = "debug"
            file_path = "/tmp/cloudsim"
            rotation = "hourly"
            "#,
        )
        .unwrap();
        assert_eq!(config.rotation, LogRotation::Hourly);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/cloudsim")));
        assert!(!config.json_format);
    }
}
