//! Structured logging to stderr.
//!
//! Stdout is left to command output so it stays machine-readable.

use crate::{LogFormat, TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging subsystem.
///
/// Sets up tracing-subscriber with either JSON or pretty format,
/// respecting the configured log level unless `RUST_LOG` is set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

fn init_json_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_file(false)
        .with_line_number(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

fn init_pretty_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Standard log event names.
pub mod events {
    /// An execution request reached the header spy.
    pub const REQUEST_RECEIVED: &str = "request_received";

    /// A server entry is being rewritten.
    pub const SERVER_HANDLED: &str = "server_handled";

    /// A header value went through the decryption gateway.
    pub const HEADER_DECRYPTED: &str = "header_decrypted";

    /// The decryption gateway failed for a header.
    pub const HEADER_DECRYPTION_FAILED: &str = "header_decryption_failed";

    /// The rewritten server list was installed on the request.
    pub const REQUEST_REWRITTEN: &str = "request_rewritten";
}

/// Helper macros for structured logging with standard fields.
///
/// These wrap the tracing macros to ensure consistent field naming.
#[macro_export]
macro_rules! log_request_received {
    ($($field:tt)*) => {
        tracing::debug!(
            event = $crate::logging::events::REQUEST_RECEIVED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_server_handled {
    ($($field:tt)*) => {
        tracing::debug!(
            event = $crate::logging::events::SERVER_HANDLED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_header_decrypted {
    ($($field:tt)*) => {
        tracing::debug!(
            event = $crate::logging::events::HEADER_DECRYPTED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_header_decryption_failed {
    ($($field:tt)*) => {
        tracing::error!(
            event = $crate::logging::events::HEADER_DECRYPTION_FAILED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_request_rewritten {
    ($($field:tt)*) => {
        tracing::debug!(
            event = $crate::logging::events::REQUEST_REWRITTEN,
            $($field)*
        )
    };
}
