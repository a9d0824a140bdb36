// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server, database, and cook settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::defaults;

/// Environment type for logging and other runtime decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL, e.g. `sqlite:./cloudcookbook.db` or `sqlite::memory:`
    pub url: String,
    /// Pool size
    pub max_connections: u32,
    /// How long a connection waits for a lock before failing
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    /// True for URLs that open a private in-memory database
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DATABASE_URL.to_owned(),
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
            busy_timeout_ms: defaults::DATABASE_BUSY_TIMEOUT_MS,
        }
    }
}

/// Cook transaction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookConfig {
    /// Attempts before a conflicting cook gives up
    pub max_attempts: u32,
}

impl Default for CookConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::COOK_MAX_ATTEMPTS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Cook transaction settings
    pub cook: CookConfig,
    /// Seed the catalog when the database is empty
    pub seed_on_startup: bool,
    /// Comma-separated allowed origins, `*` for any
    pub cors_allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            cook: CookConfig::default(),
            seed_on_startup: true,
            cors_allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed, or the
    /// resulting configuration is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed, or the
    /// resulting configuration is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            http_port: parse_var(&lookup, "HTTP_PORT", defaults::HTTP_PORT)?,
            host: lookup("HOST").unwrap_or_else(|| defaults::HOST.to_owned()),
            environment: lookup("ENVIRONMENT")
                .map(|v| Environment::from_str_or_default(&v))
                .unwrap_or_default(),
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(|| defaults::DATABASE_URL.to_owned()),
                max_connections: parse_var(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    defaults::DATABASE_MAX_CONNECTIONS,
                )?,
                busy_timeout_ms: parse_var(
                    &lookup,
                    "DATABASE_BUSY_TIMEOUT_MS",
                    defaults::DATABASE_BUSY_TIMEOUT_MS,
                )?,
            },
            cook: CookConfig {
                max_attempts: parse_var(&lookup, "COOK_MAX_ATTEMPTS", defaults::COOK_MAX_ATTEMPTS)?,
            },
            seed_on_startup: parse_bool(&lookup, "SEED_ON_STARTUP", true)?,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| defaults::CORS_ALLOWED_ORIGINS.to_owned()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is outside its usable range
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("HTTP_PORT must be greater than 0"));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow!("DATABASE_MAX_CONNECTIONS must be at least 1"));
        }
        if self.cook.max_attempts == 0 {
            return Err(anyhow!("COOK_MAX_ATTEMPTS must be at least 1"));
        }
        if self.database.url.trim().is_empty() {
            return Err(anyhow!("DATABASE_URL must not be empty"));
        }
        Ok(())
    }

    /// Human readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "CloudCookbook Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Database: {} (pool {}, busy timeout {}ms)\n\
             - Cook Attempts: {}\n\
             - Seed On Startup: {}\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.database.url,
            self.database.max_connections,
            self.database.busy_timeout_ms,
            self.cook.max_attempts,
            self.seed_on_startup,
            self.cors_allowed_origins,
        )
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "off") => Ok(false),
        Some(v) => Err(anyhow!("Invalid {key} value '{v}', expected true or false")),
    }
}
