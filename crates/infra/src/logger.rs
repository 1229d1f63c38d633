//! Logging infrastructure for Scalar Kiota
//!
//! Installs a global `tracing` subscriber. Output is human readable by
//! default and JSON when requested. `RUST_LOG` directives are honoured on
//! top of the configured level.

use scalar_kiota_core::{Result, ScalarKiotaError};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding the log level
pub const LOG_LEVEL_VAR: &str = "SCALAR_KIOTA_LOG_LEVEL";

/// Environment variable switching on JSON output
pub const LOG_JSON_VAR: &str = "SCALAR_KIOTA_LOG_JSON";

/// Environment variable controlling timestamps
pub const LOG_TIMESTAMPS_VAR: &str = "SCALAR_KIOTA_LOG_TIMESTAMPS";

/// Chatty dependencies capped below the configured level
const QUIET_TARGETS: [&str; 4] = ["hyper=warn", "reqwest=warn", "h2=warn", "handlebars=warn"];

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to use JSON format
    pub json_format: bool,
    /// Whether to include timestamps
    pub with_timestamps: bool,
    /// Whether to include file/line information
    pub with_file_info: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            with_timestamps: true,
            with_file_info: false,
        }
    }
}

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let level = LogLevel::parse(&config.level)?;

    let mut env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    for target in QUIET_TARGETS {
        let directive = Directive::from_str(target).map_err(|e| {
            ScalarKiotaError::validation(format!("Invalid log directive '{}': {}", target, e))
        })?;
        env_filter = env_filter.add_directive(directive);
    }

    let fmt_layer = if config.json_format {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info)
            .boxed()
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_file(config.with_file_info)
            .with_line_number(config.with_file_info);

        if config.with_timestamps {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| {
            ScalarKiotaError::validation(format!("Failed to initialize logger: {}", e))
        })?;

    tracing::debug!(level = %config.level, json = config.json_format, "Logger initialized");
    Ok(())
}

/// Initialize logger for testing (reduces noise)
pub fn init_test_logger() -> Result<()> {
    let config = LoggerConfig {
        level: "warn".to_string(),
        with_timestamps: false,
        ..LoggerConfig::default()
    };

    // Ignore errors if already initialized
    let _ = init_logger(config);
    Ok(())
}

/// Create a logger configuration from `SCALAR_KIOTA_LOG_*` variables
pub fn logger_config_from_env() -> LoggerConfig {
    logger_config_from_lookup(|name| std::env::var(name).ok())
}

/// Create a logger configuration from an arbitrary variable lookup
pub fn logger_config_from_lookup<F>(lookup: F) -> LoggerConfig
where
    F: Fn(&str) -> Option<String>,
{
    let flag = |name: &str, default: bool| {
        lookup(name)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    };

    LoggerConfig {
        level: lookup(LOG_LEVEL_VAR).unwrap_or_else(|| "info".to_string()),
        json_format: flag(LOG_JSON_VAR, false),
        with_timestamps: flag(LOG_TIMESTAMPS_VAR, true),
        with_file_info: false,
    }
}

/// Log level utilities
pub struct LogLevel;

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level: &str) -> Result<Level> {
        Level::from_str(level).map_err(|e| {
            ScalarKiotaError::validation(format!("Invalid log level '{}': {}", level, e))
        })
    }
}
