// ABOUTME: Error type for the cook transaction executor
// ABOUTME: Converts into AppError so HTTP responses carry shortfall details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! # Cook Error Types
//!
//! `CookError` separates the outcomes a caller must react to differently:
//! missing entities, an uncookable pantry, stored data that can never be
//! cooked, and a pantry that kept changing under concurrent writers.

use thiserror::Error;

use super::{AppError, ErrorCode};
use crate::models::{RecipeId, Shortfall, UserId};

/// Failures of `cook(user_id, recipe_id)`
#[derive(Debug, Error)]
pub enum CookError {
    /// The user does not exist
    #[error("User {0} not found")]
    UserNotFound(UserId),

    /// The recipe does not exist
    #[error("Recipe {0} not found")]
    RecipeNotFound(RecipeId),

    /// At least one requirement exceeds the pantry
    #[error("Not enough ingredients to cook recipe {recipe_id}")]
    InsufficientStock {
        /// Recipe that could not be cooked
        recipe_id: RecipeId,
        /// Every insufficient ingredient
        shortfalls: Vec<Shortfall>,
    },

    /// The recipe declares no requirements
    #[error("Recipe {recipe_id} has no required ingredients")]
    EmptyRecipe {
        /// Offending recipe
        recipe_id: RecipeId,
    },

    /// Concurrent writers kept invalidating the transaction
    #[error("Pantry of user {user_id} kept changing, gave up after {attempts} attempts")]
    ConflictRetryExhausted {
        /// Cook
        user_id: UserId,
        /// Attempts made
        attempts: u32,
    },

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] AppError),
}

impl From<CookError> for AppError {
    fn from(error: CookError) -> Self {
        match error {
            CookError::UserNotFound(user_id) => Self::not_found(format!("User {user_id}")),
            CookError::RecipeNotFound(recipe_id) => Self::not_found(format!("Recipe {recipe_id}")),
            CookError::InsufficientStock {
                recipe_id,
                shortfalls,
            } => Self::new(
                ErrorCode::InsufficientStock,
                format!("Not enough ingredients to cook recipe {recipe_id}"),
            )
            .with_details(serde_json::json!({
                "recipe_id": recipe_id,
                "missing": shortfalls,
            })),
            CookError::EmptyRecipe { recipe_id } => Self::data_integrity(format!(
                "Recipe {recipe_id} has no required ingredients"
            )),
            CookError::ConflictRetryExhausted { user_id, attempts } => Self::new(
                ErrorCode::ConflictRetryExhausted,
                format!("Pantry of user {user_id} kept changing, gave up after {attempts} attempts"),
            )
            .with_details(serde_json::json!({ "attempts": attempts })),
            CookError::Storage(error) => error,
        }
    }
}
