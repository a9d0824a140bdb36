// ABOUTME: Pantry store repository implementation
// ABOUTME: Hands out write-locked SQLite transactions for cooking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use async_trait::async_trait;

use super::{PantryStore, PantryTransaction};
use crate::database::{Database, SqlitePantryTransaction};
use crate::errors::AppResult;
use crate::models::{IngredientId, Pantry, UserId};

/// `SQLite` implementation of `PantryStore`
pub struct PantryRepositoryImpl {
    db: Database,
}

impl PantryRepositoryImpl {
    /// Create a new `PantryStore` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PantryStore for PantryRepositoryImpl {
    async fn get_pantry(&self, user_id: UserId) -> AppResult<Pantry> {
        self.db.pantry().get_pantry(user_id).await
    }

    async fn begin_cook(&self, user_id: UserId) -> AppResult<Box<dyn PantryTransaction>> {
        let tx = self.db.pantry().begin_cook(user_id).await?;
        Ok(Box::new(tx))
    }
}

#[async_trait]
impl PantryTransaction for SqlitePantryTransaction {
    async fn pantry(&mut self) -> AppResult<Pantry> {
        Self::pantry(self).await
    }

    async fn decrement(&mut self, ingredient_id: IngredientId, amount: i64) -> AppResult<i64> {
        Self::decrement(self, ingredient_id, amount).await
    }

    async fn delete_entry(&mut self, ingredient_id: IngredientId) -> AppResult<bool> {
        Self::delete_entry(self, ingredient_id).await
    }

    async fn commit(&mut self) -> AppResult<()> {
        Self::commit(self).await
    }

    async fn rollback(&mut self) -> AppResult<()> {
        Self::rollback(self).await
    }
}
