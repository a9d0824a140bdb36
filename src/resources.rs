// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the database, configuration, matchmaker and cook executor behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::sync::Arc;

use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::matchmaking::{CookExecutor, Matchmaker};

/// Centralized resource container for dependency injection
///
/// Created once at startup; routes receive it as `Arc<ServerResources>`.
pub struct ServerResources {
    /// Connection pool and managers
    pub database: Arc<Database>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Cookable-recipe finder
    pub matchmaker: Arc<Matchmaker>,
    /// Atomic cook executor
    pub cook_executor: Arc<CookExecutor>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let matchmaker = Matchmaker::from_database(&database);
        let cook_executor = CookExecutor::from_database(&database, config.cook.max_attempts);

        Self {
            database: Arc::new(database),
            config,
            matchmaker: Arc::new(matchmaker),
            cook_executor: Arc::new(cook_executor),
        }
    }
}
