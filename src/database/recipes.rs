// ABOUTME: Database operations for recipes, their instruction steps, and ingredient requirements
// ABOUTME: Creates and rewrites recipes atomically, auto-creating unknown ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::collections::BTreeMap;

use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::info;

use super::items::find_or_create;
use super::transactions::SqliteTransactionGuard;
use crate::constants::defaults::RECIPE_CREATOR_ID;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    IngredientId, Recipe, RecipeDraft, RecipeId, RecipeIngredient, RecipeSummary, UserId,
};

const RECIPE_COLUMNS: &str =
    "recipe_id, recipe_name, description, recipe_creator, time_needed";

/// Recipe catalog manager
#[derive(Clone)]
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a recipe with its steps and requirements in one transaction
    ///
    /// Unknown ingredient names are added to the catalog. The creator
    /// defaults to the admin account (user 1).
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, `ResourceNotFound` when the
    /// creator does not exist, or a database error
    pub async fn create(&self, draft: RecipeDraft) -> AppResult<RecipeId> {
        let draft = draft.validated()?;
        let creator = draft
            .recipe_creator
            .unwrap_or(UserId::new(RECIPE_CREATOR_ID));

        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        let mut guard = SqliteTransactionGuard::new(tx);

        ensure_user_exists(guard.executor()?, creator).await?;

        let result = sqlx::query(
            r"
            INSERT INTO recipes (recipe_name, description, recipe_creator, time_needed)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&draft.recipe_name)
        .bind(&draft.description)
        .bind(creator.get())
        .bind(i64::from(draft.time_needed))
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;
        let recipe_id = RecipeId::new(result.last_insert_rowid());

        write_recipe_body(guard.executor()?, recipe_id, &draft).await?;
        guard.commit().await?;

        AppLogger::log_sql(
            "INSERT INTO recipes",
            &format!("recipe_id={recipe_id} recipe_name={}", draft.recipe_name),
        );
        info!(
            recipe_id = %recipe_id,
            recipe_name = %draft.recipe_name,
            ingredients = draft.recipe_ingredients.len(),
            steps = draft.instructions.len(),
            "Recipe created"
        );
        Ok(recipe_id)
    }

    /// Replace a recipe's fields, steps, and requirements in one transaction
    ///
    /// Returns `false` when the recipe does not exist. An omitted creator
    /// keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft, `ResourceNotFound` when a
    /// new creator does not exist, or a database error
    pub async fn update(&self, recipe_id: RecipeId, draft: RecipeDraft) -> AppResult<bool> {
        let draft = draft.validated()?;

        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        let mut guard = SqliteTransactionGuard::new(tx);

        if let Some(creator) = draft.recipe_creator {
            ensure_user_exists(guard.executor()?, creator).await?;
        }

        let updated = sqlx::query(
            r"
            UPDATE recipes
            SET recipe_name = $1,
                description = $2,
                recipe_creator = COALESCE($3, recipe_creator),
                time_needed = $4
            WHERE recipe_id = $5
            ",
        )
        .bind(&draft.recipe_name)
        .bind(&draft.description)
        .bind(draft.recipe_creator.map(UserId::get))
        .bind(i64::from(draft.time_needed))
        .bind(recipe_id.get())
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        if updated.rows_affected() == 0 {
            guard.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM recipe_steps WHERE recipe_id = $1")
            .bind(recipe_id.get())
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear recipe steps: {e}")))?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id.get())
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear recipe ingredients: {e}")))?;

        write_recipe_body(guard.executor()?, recipe_id, &draft).await?;
        guard.commit().await?;

        AppLogger::log_sql("UPDATE recipes", &format!("recipe_id={recipe_id}"));
        info!(recipe_id = %recipe_id, "Recipe rewritten");
        Ok(true)
    }

    /// Get a full recipe with ordered steps and requirements
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a row is malformed
    pub async fn get(&self, recipe_id: RecipeId) -> AppResult<Option<Recipe>> {
        let row = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE recipe_id = $1"
        ))
        .bind(recipe_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let summary = row_to_summary(&row)?;

        let ingredient_rows = sqlx::query(
            r"
            SELECT ri.recipe_id, ri.ingredient_id, ri.quantity, i.ingredient_name
            FROM recipe_ingredients ri
            LEFT JOIN items i ON i.ingredient_id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.ingredient_id
            ",
        )
        .bind(recipe_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe ingredients: {e}")))?;

        let instructions: Vec<String> = sqlx::query_scalar(
            "SELECT instruction FROM recipe_steps WHERE recipe_id = $1 ORDER BY step_number",
        )
        .bind(recipe_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe steps: {e}")))?;

        Ok(Some(Recipe {
            recipe_id: summary.recipe_id,
            recipe_name: summary.recipe_name,
            description: summary.description,
            recipe_creator: summary.recipe_creator,
            time_needed: summary.time_needed,
            instructions,
            ingredients: ingredient_rows.iter().map(row_to_ingredient).collect(),
        }))
    }

    /// List recipe summaries ascending by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a row is malformed
    pub async fn list_summaries(&self, limit: Option<u32>) -> AppResult<Vec<RecipeSummary>> {
        let rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY recipe_id LIMIT $1"
        ))
        .bind(limit.map_or(-1, i64::from))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(row_to_summary).collect()
    }

    /// Load every recipe with its steps and requirements, ascending by id
    ///
    /// Three queries are issued regardless of catalog size; rows are grouped
    /// in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a row is malformed
    pub async fn list_all(&self) -> AppResult<Vec<Recipe>> {
        let recipe_rows = sqlx::query(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY recipe_id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let mut recipes = BTreeMap::new();
        for row in &recipe_rows {
            let summary = row_to_summary(row)?;
            recipes.insert(
                summary.recipe_id,
                Recipe {
                    recipe_id: summary.recipe_id,
                    recipe_name: summary.recipe_name,
                    description: summary.description,
                    recipe_creator: summary.recipe_creator,
                    time_needed: summary.time_needed,
                    instructions: Vec::new(),
                    ingredients: Vec::new(),
                },
            );
        }

        let ingredient_rows = sqlx::query(
            r"
            SELECT ri.recipe_id, ri.ingredient_id, ri.quantity, i.ingredient_name
            FROM recipe_ingredients ri
            LEFT JOIN items i ON i.ingredient_id = ri.ingredient_id
            ORDER BY ri.recipe_id, ri.ingredient_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipe ingredients: {e}")))?;

        for row in &ingredient_rows {
            let recipe_id = RecipeId::new(row.get("recipe_id"));
            if let Some(recipe) = recipes.get_mut(&recipe_id) {
                recipe.ingredients.push(row_to_ingredient(row));
            }
        }

        let step_rows = sqlx::query(
            "SELECT recipe_id, instruction FROM recipe_steps ORDER BY recipe_id, step_number",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recipe steps: {e}")))?;

        for row in &step_rows {
            let recipe_id = RecipeId::new(row.get("recipe_id"));
            if let Some(recipe) = recipes.get_mut(&recipe_id) {
                recipe.instructions.push(row.get("instruction"));
            }
        }

        Ok(recipes.into_values().collect())
    }

    /// Find a recipe id by exact (normalized) name
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn find_id_by_name(&self, recipe_name: &str) -> AppResult<Option<RecipeId>> {
        let id: Option<i64> = sqlx::query_scalar(
            "SELECT recipe_id FROM recipes WHERE recipe_name = $1 ORDER BY recipe_id LIMIT 1",
        )
        .bind(recipe_name.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find recipe: {e}")))?;
        Ok(id.map(RecipeId::new))
    }
}

async fn ensure_user_exists(conn: &mut SqliteConnection, user_id: UserId) -> AppResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE user_id = $1")
        .bind(user_id.get())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to check recipe creator: {e}")))?;
    if found.is_none() {
        return Err(AppError::not_found(format!("User {user_id}")));
    }
    Ok(())
}

/// Insert steps and requirements of a validated draft
async fn write_recipe_body(
    conn: &mut SqliteConnection,
    recipe_id: RecipeId,
    draft: &RecipeDraft,
) -> AppResult<()> {
    for (index, instruction) in draft.instructions.iter().enumerate() {
        sqlx::query(
            "INSERT INTO recipe_steps (recipe_id, step_number, instruction) VALUES ($1, $2, $3)",
        )
        .bind(recipe_id.get())
        .bind(index as i64 + 1)
        .bind(instruction)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe step: {e}")))?;
    }

    for (ingredient_name, quantity) in &draft.recipe_ingredients {
        let ingredient_id = find_or_create(&mut *conn, ingredient_name).await?;
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity) VALUES ($1, $2, $3)",
        )
        .bind(recipe_id.get())
        .bind(ingredient_id.get())
        .bind(*quantity)
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe ingredient: {e}")))?;
    }
    Ok(())
}

fn row_to_summary(row: &SqliteRow) -> AppResult<RecipeSummary> {
    let time_needed: i64 = row.get("time_needed");
    let recipe_creator: Option<i64> = row.get("recipe_creator");

    Ok(RecipeSummary {
        recipe_id: RecipeId::new(row.get("recipe_id")),
        recipe_name: row.get("recipe_name"),
        description: row.get("description"),
        recipe_creator: recipe_creator.map(UserId::new),
        time_needed: u32::try_from(time_needed)
            .map_err(|e| AppError::data_integrity(format!("Invalid time_needed {time_needed}: {e}")))?,
    })
}

fn row_to_ingredient(row: &SqliteRow) -> RecipeIngredient {
    RecipeIngredient {
        ingredient_id: IngredientId::new(row.get("ingredient_id")),
        ingredient_name: row.get("ingredient_name"),
        quantity: row.get("quantity"),
    }
}
