// ABOUTME: Repository traits the matchmaking engine depends on
// ABOUTME: Decouples the matcher and cook executor from SQLite so both can be tested in isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! # Repository Traits
//!
//! The matchmaking engine reads the catalog, reads and mutates pantries, and
//! checks users only through these traits. The `*RepositoryImpl` types wrap a
//! [`Database`](crate::database::Database) and delegate to its managers.

mod catalog_repository;
mod pantry_repository;
mod user_repository;

use async_trait::async_trait;

pub use catalog_repository::CatalogRepositoryImpl;
pub use pantry_repository::PantryRepositoryImpl;
pub use user_repository::UserRepositoryImpl;

use crate::errors::AppResult;
use crate::models::{IngredientId, Pantry, Recipe, RecipeId, UserId};

/// Read access to recipes and their requirements
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Get one recipe with its requirements
    async fn get_recipe(&self, recipe_id: RecipeId) -> AppResult<Option<Recipe>>;

    /// Load every recipe, ascending by id
    async fn list_recipes(&self) -> AppResult<Vec<Recipe>>;
}

/// Pantry reads and the cook unit of work
#[async_trait]
pub trait PantryStore: Send + Sync {
    /// Read a user's on-hand quantities
    async fn get_pantry(&self, user_id: UserId) -> AppResult<Pantry>;

    /// Open a write-locked transaction over a user's pantry
    async fn begin_cook(&self, user_id: UserId) -> AppResult<Box<dyn PantryTransaction>>;
}

/// Unit of work over one user's pantry
///
/// Dropping an uncommitted transaction discards every change.
#[async_trait]
pub trait PantryTransaction: Send {
    /// Pantry state as seen inside the transaction
    async fn pantry(&mut self) -> AppResult<Pantry>;

    /// Subtract `amount` from an entry holding at least that much, returning the remainder
    async fn decrement(&mut self, ingredient_id: IngredientId, amount: i64) -> AppResult<i64>;

    /// Delete an entry, returning whether it existed
    async fn delete_entry(&mut self, ingredient_id: IngredientId) -> AppResult<bool>;

    /// Make all changes durable
    async fn commit(&mut self) -> AppResult<()>;

    /// Discard all changes
    async fn rollback(&mut self) -> AppResult<()>;
}

/// User existence checks
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// True when the user exists
    async fn exists(&self, user_id: UserId) -> AppResult<bool>;
}
