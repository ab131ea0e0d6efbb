// ABOUTME: Logging configuration and structured logging setup for the CSRF layer
// ABOUTME: Configures log levels and output formats via tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging configuration
//!
//! Rejections are logged at `warn` with the concrete validation failure as
//! a field; successful validations at `debug`. The subscriber is installed
//! once by the embedding application.

use crate::config::types::{Environment, LogLevel};
use crate::errors::{AppError, AppResult};
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Machine-readable JSON lines (production)
    Json,
    /// Human-readable multi-line output (development)
    #[default]
    Pretty,
    /// Single-line human-readable output
    Compact,
}

impl LogFormat {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: LogLevel,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Environment the service runs in
    pub environment: Environment,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            environment: Environment::Development,
        }
    }
}

impl LoggingConfig {
    /// Load logging configuration from `LOG_LEVEL`, `LOG_FORMAT`, and
    /// `ENVIRONMENT`
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::from_str_or_default(&s))
            .unwrap_or_default();

        // Production defaults to JSON so log pipelines can index fields
        let default_format = if environment.is_production() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };

        Self {
            level: env::var("LOG_LEVEL")
                .map(|s| LogLevel::from_str_or_default(&s))
                .unwrap_or_default(),
            format: env::var("LOG_FORMAT")
                .map(|s| LogFormat::from_str_or_default(&s))
                .unwrap_or(default_format),
            environment,
        }
    }

    /// Install the global tracing subscriber for this configuration
    ///
    /// `RUST_LOG` overrides the configured level when set.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> AppResult<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_tracing_level().to_string()));

        let registry = tracing_subscriber::registry().with(filter);
        let result = match self.format {
            LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
            LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
            LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        };

        result.map_err(|e| AppError::config("tracing subscriber already installed").with_source(e))
    }
}

/// Load logging configuration from the environment and install it
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_from_env() -> AppResult<()> {
    LoggingConfig::from_env().init()
}
