// ABOUTME: Logging configuration and structured logging setup for observability and debugging
// ABOUTME: Splits application, SQL audit, and API access events into separate tracing targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! Structured logging configuration
//!
//! Three tracing targets separate the log stream by concern:
//!
//! - `cloudcookbook`: application events
//! - `sql_audit`: statements that change stored state
//! - `api_access`: one line per HTTP request
//!
//! Each can be filtered independently, e.g. `RUST_LOG=info,sql_audit=off`.

use std::env;
use std::io;

use anyhow::Result;
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::{log_targets, service_names};
use crate::models::{PantryAction, RecipeId, UserId};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to pretty output
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::CLOUDCOOKBOOK.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT").map_or(LogFormat::Pretty, |v| LogFormat::parse(&v));
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // In production, use more detailed logging
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::CLOUDCOOKBOOK.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Build the filter, always applying noise reduction for dependencies
    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(&self.level);
        for directive in [
            "hyper=warn",
            "hyper::proto=warn",
            "sqlx=warn",
            "sqlx::query=warn",
            "tower_http=info",
        ] {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
        filter
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "CloudCookbook starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!("Logging configured: {}", config_summary);
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Log an HTTP request on the access target
    pub fn log_api_request(method: &str, path: &str, status: u16, duration_ms: u64) {
        info!(
            target: log_targets::API_ACCESS,
            method = %method,
            path = %path,
            status = %status,
            duration_ms = %duration_ms,
            "{method} {path} - {status} - {duration_ms}ms"
        );
    }

    /// Log a state-changing SQL statement on the audit target
    pub fn log_sql(statement: &str, params: &str) {
        info!(
            target: log_targets::SQL_AUDIT,
            statement = %statement,
            params = %params,
            "SQL executed"
        );
    }

    /// Log a manual pantry change
    pub fn log_pantry_update(
        user_id: UserId,
        ingredient_name: &str,
        action: PantryAction,
        amount: i64,
        resulting_amount: i64,
    ) {
        info!(
            user.id = %user_id,
            pantry.ingredient = %ingredient_name,
            pantry.action = ?action,
            pantry.amount = amount,
            pantry.resulting_amount = resulting_amount,
            "Pantry updated"
        );
    }

    /// Log the outcome of a cook request
    pub fn log_cook_event(user_id: UserId, recipe_id: RecipeId, success: bool, details: &str) {
        if success {
            info!(
                user.id = %user_id,
                recipe.id = %recipe_id,
                cook.success = success,
                cook.details = %details,
                "Cook event"
            );
        } else {
            debug!(
                user.id = %user_id,
                recipe.id = %recipe_id,
                cook.success = success,
                cook.details = %details,
                "Cook event"
            );
        }
    }

    /// Log stored data that violates a catalog invariant
    pub fn log_data_integrity_warning(recipe_id: RecipeId, details: &str) {
        warn!(
            recipe.id = %recipe_id,
            integrity.details = %details,
            "Data integrity warning"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" COMPACT "), LogFormat::Compact);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.service_name, "cloudcookbook");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.include_location);
    }

    #[test]
    fn test_targeted_loggers_emit_without_subscriber() {
        AppLogger::log_api_request("GET", "/matchmaking/1", 200, 3);
        AppLogger::log_sql("DELETE FROM pantry", "user_id=1 ingredient_id=2");
        assert_eq!(log_targets::API_ACCESS, "api_access");
        assert_eq!(log_targets::SQL_AUDIT, "sql_audit");
    }
}
