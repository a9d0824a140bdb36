// ABOUTME: SQLite database handle, connection setup, and schema migrations
// ABOUTME: Exposes per-table managers for users, items, recipes, and pantries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! # Database Management
//!
//! `Database` owns the `SQLite` connection pool and creates the schema on
//! startup. Table access goes through small managers that share the pool:
//!
//! - [`UsersManager`]: user accounts
//! - [`ItemsManager`]: the global ingredient catalog
//! - [`RecipesManager`]: recipes with their steps and requirements
//! - [`PantryManager`]: per-user inventories and the cook unit of work

mod items;
mod pantry;
mod recipes;
/// Repository traits consumed by the matchmaking engine
pub mod repositories;
/// Idempotent catalog seeding
pub mod seed;
/// RAII transaction guard and retry helper
pub mod transactions;
mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

pub use items::ItemsManager;
pub use pantry::{PantryManager, SqlitePantryTransaction};
pub use recipes::RecipesManager;
pub use users::UsersManager;

use crate::config::environment::DatabaseConfig;
use crate::errors::{AppError, AppResult};

/// Database manager owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a database with default pool settings
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or migrations fail
    pub async fn new(database_url: &str) -> AppResult<Self> {
        Self::connect(&DatabaseConfig {
            url: database_url.to_owned(),
            ..DatabaseConfig::default()
        })
        .await
    }

    /// Open a database using explicit pool settings and run migrations
    ///
    /// File databases are created when missing and use the WAL journal so
    /// readers never block the single writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or migrations fail
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| AppError::config(format!("Invalid database URL '{}': {e}", config.url)))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));
        if !config.is_in_memory() {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // Every connection to `:memory:` opens a separate database, so an
        // in-memory pool is pinned to one connection that is never recycled.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(
            max_connections = config.max_connections,
            busy_timeout_ms = config.busy_timeout_ms,
            in_memory = config.is_in_memory(),
            "Database ready"
        );
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// User account operations
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Ingredient catalog operations
    #[must_use]
    pub fn items(&self) -> ItemsManager {
        ItemsManager::new(self.pool.clone())
    }

    /// Recipe catalog operations
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Pantry operations
    #[must_use]
    pub fn pantry(&self) -> PantryManager {
        PantryManager::new(self.pool.clone())
    }

    /// Lightweight connectivity check used by the health endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot answer a trivial query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_items().await?;
        self.migrate_recipes().await?;
        self.migrate_pantry().await?;
        debug!("Database schema is up to date");
        Ok(())
    }

    async fn execute_schema(&self, statement: &str, table: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to migrate {table}: {e}")))?;
        Ok(())
    }

    async fn migrate_users(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                active BOOLEAN NOT NULL DEFAULT 1,
                member_since TEXT NOT NULL
            )
            ",
            "users",
        )
        .await
    }

    async fn migrate_items(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS items (
                ingredient_id INTEGER PRIMARY KEY AUTOINCREMENT,
                ingredient_name TEXT NOT NULL UNIQUE COLLATE NOCASE
            )
            ",
            "items",
        )
        .await
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                recipe_id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_name TEXT NOT NULL,
                description TEXT,
                recipe_creator INTEGER REFERENCES users(user_id) ON DELETE SET NULL,
                time_needed INTEGER NOT NULL CHECK (time_needed > 0)
            )
            ",
            "recipes",
        )
        .await?;

        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS recipe_steps (
                recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                step_number INTEGER NOT NULL,
                instruction TEXT NOT NULL,
                PRIMARY KEY (recipe_id, step_number)
            )
            ",
            "recipe_steps",
        )
        .await?;

        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(recipe_id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES items(ingredient_id),
                quantity INTEGER NOT NULL CHECK (quantity > 0),
                PRIMARY KEY (recipe_id, ingredient_id)
            )
            ",
            "recipe_ingredients",
        )
        .await
    }

    async fn migrate_pantry(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS pantry (
                user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES items(ingredient_id),
                amount INTEGER NOT NULL CHECK (amount > 0),
                PRIMARY KEY (user_id, ingredient_id)
            )
            ",
            "pantry",
        )
        .await?;

        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_ingredient ON recipe_ingredients(ingredient_id)",
            "recipe_ingredients index",
        )
        .await
    }
}
