// ABOUTME: Application constants for the CloudCookbook backend
// ABOUTME: Field limits, configuration defaults, and tracing targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! Constants module
//!
//! Constants are grouped by domain. Field limits are shared by request
//! validation and the seeding code so both reject the same inputs.

/// Validation limits for catalog and user fields
pub mod limits {
    /// Minimum username length in characters
    pub const USERNAME_MIN_LEN: usize = 3;
    /// Maximum username length in characters
    pub const USERNAME_MAX_LEN: usize = 30;
    /// Minimum ingredient name length after normalization
    pub const INGREDIENT_NAME_MIN_LEN: usize = 2;
    /// Maximum ingredient name length after normalization
    pub const INGREDIENT_NAME_MAX_LEN: usize = 30;
    /// Minimum recipe name length after normalization
    pub const RECIPE_NAME_MIN_LEN: usize = 3;
    /// Maximum recipe name length after normalization
    pub const RECIPE_NAME_MAX_LEN: usize = 50;
    /// Maximum recipe description length
    pub const DESCRIPTION_MAX_LEN: usize = 200;
    /// Maximum preparation time in minutes
    pub const TIME_NEEDED_MAX_MINUTES: u32 = 600;
    /// Largest page size accepted for recipe listings
    pub const MAX_RECIPE_LIST_LIMIT: u32 = 500;
}

/// Default values used when environment variables are absent
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8000;
    /// HTTP bind address
    pub const HOST: &str = "0.0.0.0";
    /// `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:./cloudcookbook.db";
    /// Connection pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
    /// How long a connection waits on a locked database before failing
    pub const DATABASE_BUSY_TIMEOUT_MS: u64 = 5_000;
    /// Attempts a manual pantry update makes before giving up on lock contention
    pub const PANTRY_WRITE_ATTEMPTS: u32 = 3;
    /// Attempts a cook transaction makes before reporting a conflict
    pub const COOK_MAX_ATTEMPTS: u32 = 5;
    /// Creator assigned to recipes submitted without one
    pub const RECIPE_CREATOR_ID: i64 = 1;
    /// Allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Service identity used in logs
pub mod service_names {
    /// Name reported in structured logs
    pub const CLOUDCOOKBOOK: &str = "cloudcookbook";
}

/// Tracing targets that split the log stream by concern
pub mod log_targets {
    /// Application events
    pub const APP: &str = "cloudcookbook";
    /// SQL statements that change stored state
    pub const SQL_AUDIT: &str = "sql_audit";
    /// One line per handled HTTP request
    pub const API_ACCESS: &str = "api_access";
}
