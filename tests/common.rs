// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory and file-backed databases plus user, pantry and recipe helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `cloudcookbook`

use std::collections::BTreeMap;
use std::sync::{Arc, Once};

use anyhow::Result;
use cloudcookbook::{
    config::environment::{DatabaseConfig, ServerConfig},
    database::Database,
    models::{
        CreateUserRequest, IngredientId, PantryAction, PantryUpdateRequest, RecipeDraft, RecipeId,
        User, UserId,
    },
    resources::ServerResources,
};
use tempfile::TempDir;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard in-memory test database with the schema applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// File-backed database for tests that need several pooled connections
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub async fn create_file_database() -> Result<(Database, TempDir)> {
    init_test_logging();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cookbook.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        max_connections: 8,
        busy_timeout_ms: 5_000,
    };
    Ok((Database::connect(&config).await?, dir))
}

/// Server resources over the given database with test configuration
pub fn create_test_resources(database: Database) -> Arc<ServerResources> {
    let config = ServerConfig {
        seed_on_startup: false,
        ..ServerConfig::default()
    };
    Arc::new(ServerResources::new(database, Arc::new(config)))
}

/// Create an active user
pub async fn create_user(database: &Database, username: &str) -> Result<User> {
    Ok(database
        .users()
        .create(&CreateUserRequest {
            username: username.to_owned(),
            active: None,
        })
        .await?)
}

/// Add `amount` of an ingredient to a pantry, creating the ingredient if needed
pub async fn stock(database: &Database, user_id: UserId, name: &str, amount: i64) -> Result<()> {
    database
        .pantry()
        .apply_update(
            user_id,
            &PantryUpdateRequest {
                ingredient_name: name.to_owned(),
                amount,
                action: PantryAction::Add,
            },
        )
        .await?;
    Ok(())
}

/// Create a recipe from `(ingredient, quantity)` pairs
///
/// The admin account (user 1) must exist because it is the default creator.
pub async fn create_recipe(
    database: &Database,
    name: &str,
    ingredients: &[(&str, i64)],
) -> Result<RecipeId> {
    let draft = RecipeDraft {
        recipe_name: name.to_owned(),
        description: None,
        recipe_creator: None,
        time_needed: 15,
        recipe_ingredients: ingredients
            .iter()
            .map(|(ingredient, quantity)| ((*ingredient).to_owned(), *quantity))
            .collect::<BTreeMap<_, _>>(),
        instructions: vec!["mix".to_owned(), "cook".to_owned()],
    };
    Ok(database.recipes().create(draft).await?)
}

/// Look up an ingredient id by name
pub async fn ingredient_id(database: &Database, name: &str) -> Result<IngredientId> {
    let item = database
        .items()
        .find_by_name(name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("ingredient {name} missing"))?;
    Ok(item.ingredient_id)
}

/// Pantry as `(ingredient name, amount)` pairs in ingredient id order
pub async fn pantry_snapshot(database: &Database, user_id: UserId) -> Result<Vec<(String, i64)>> {
    Ok(database
        .pantry()
        .list_entries(user_id)
        .await?
        .into_iter()
        .map(|entry| (entry.ingredient_name, entry.amount))
        .collect())
}
