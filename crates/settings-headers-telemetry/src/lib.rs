//! Logging for settings-headers.
//!
//! Sets up `tracing-subscriber` on stderr (pretty or JSON) and defines the
//! standard event names the rewriter logs with. Header values never appear
//! in log fields; only header names, server ids and schema labels do.
//!
//! # Usage
//!
//! ```ignore
//! use settings_headers_telemetry::{init_logging, LogFormat, TelemetryConfig};
//!
//! let config = TelemetryConfig::new()
//!     .with_log_level("debug")
//!     .with_log_format(LogFormat::Json);
//!
//! init_logging(&config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::{events, init_logging};

use thiserror::Error;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_builder() {
        let config = TelemetryConfig::new()
            .with_log_level("debug")
            .with_log_format(LogFormat::Json);

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
