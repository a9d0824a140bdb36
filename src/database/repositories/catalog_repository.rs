// ABOUTME: Recipe catalog repository implementation
// ABOUTME: Serves recipe reads for the matcher and cook executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use async_trait::async_trait;

use super::CatalogReader;
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{Recipe, RecipeId};

/// `SQLite` implementation of `CatalogReader`
pub struct CatalogRepositoryImpl {
    db: Database,
}

impl CatalogRepositoryImpl {
    /// Create a new `CatalogReader` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogReader for CatalogRepositoryImpl {
    async fn get_recipe(&self, recipe_id: RecipeId) -> AppResult<Option<Recipe>> {
        self.db.recipes().get(recipe_id).await
    }

    async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        self.db.recipes().list_all().await
    }
}
