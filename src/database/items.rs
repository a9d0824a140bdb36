// ABOUTME: Database operations for the global ingredient catalog ("items")
// ABOUTME: Names are normalized on write and matched case-insensitively on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::info;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{normalize_ingredient_name, Ingredient, IngredientId};

/// Ingredient catalog manager
#[derive(Clone)]
pub struct ItemsManager {
    pool: SqlitePool,
}

impl ItemsManager {
    /// Create a new items manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an ingredient by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, ingredient_id: IngredientId) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query("SELECT ingredient_id, ingredient_name FROM items WHERE ingredient_id = $1")
            .bind(ingredient_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get item: {e}")))?;

        Ok(row.map(|r| Ingredient {
            ingredient_id: IngredientId::new(r.get("ingredient_id")),
            ingredient_name: r.get("ingredient_name"),
        }))
    }

    /// Find an ingredient by name, ignoring case and surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Ingredient>> {
        let row = sqlx::query(
            "SELECT ingredient_id, ingredient_name FROM items WHERE ingredient_name = $1",
        )
        .bind(name.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find item: {e}")))?;

        Ok(row.map(|r| Ingredient {
            ingredient_id: IngredientId::new(r.get("ingredient_id")),
            ingredient_name: r.get("ingredient_name"),
        }))
    }

    /// Create a new ingredient
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad name, `ResourceAlreadyExists` when the
    /// name is taken, or a database error
    pub async fn create(&self, raw_name: &str) -> AppResult<Ingredient> {
        let ingredient_name = normalize_ingredient_name(raw_name)?;

        let result = sqlx::query("INSERT INTO items (ingredient_name) VALUES ($1)")
            .bind(&ingredient_name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let error = AppError::from(e);
                if error.code == ErrorCode::ResourceAlreadyExists {
                    AppError::already_exists(format!("Item '{ingredient_name}'"))
                } else {
                    error
                }
            })?;

        let ingredient_id = IngredientId::new(result.last_insert_rowid());
        AppLogger::log_sql("INSERT INTO items", &format!("ingredient_name={ingredient_name}"));
        info!(ingredient_id = %ingredient_id, ingredient_name = %ingredient_name, "Item created");

        Ok(Ingredient {
            ingredient_id,
            ingredient_name,
        })
    }

    /// Count catalog ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count items: {e}")))
    }
}

/// Look up an ingredient id by name on an existing connection
pub(crate) async fn find_id_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> AppResult<Option<IngredientId>> {
    let id: Option<i64> =
        sqlx::query_scalar("SELECT ingredient_id FROM items WHERE ingredient_name = $1")
            .bind(name.trim().to_lowercase())
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::database(format!("Failed to find item: {e}")))?;
    Ok(id.map(IngredientId::new))
}

/// Resolve an already-normalized ingredient name, creating it when unknown
///
/// Used inside recipe and pantry transactions so the lookup and insert
/// commit together with the rows that reference the ingredient.
pub(crate) async fn find_or_create(
    conn: &mut SqliteConnection,
    ingredient_name: &str,
) -> AppResult<IngredientId> {
    if let Some(existing) = find_id_by_name(&mut *conn, ingredient_name).await? {
        return Ok(existing);
    }

    let result = sqlx::query("INSERT INTO items (ingredient_name) VALUES ($1)")
        .bind(ingredient_name)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to create item: {e}")))?;
    AppLogger::log_sql("INSERT INTO items", &format!("ingredient_name={ingredient_name}"));
    info!(ingredient_name = %ingredient_name, "Item created implicitly");

    Ok(IngredientId::new(result.last_insert_rowid()))
}
