// ABOUTME: Inventory matcher computing the cookable subset of the recipe catalog for a pantry
// ABOUTME: Skips and reports recipes whose stored requirements are empty or dangling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::database::repositories::{
    CatalogReader, CatalogRepositoryImpl, PantryRepositoryImpl, PantryStore, UserDirectory,
    UserRepositoryImpl,
};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{IngredientId, Pantry, Recipe, RecipeId, RecipeSummary, UserId};

/// A recipe excluded from matching because its stored data is inconsistent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// The recipe declares no required ingredients
    EmptyRequirements {
        /// Offending recipe
        recipe_id: RecipeId,
    },
    /// A requirement points at an ingredient missing from the catalog
    DanglingIngredient {
        /// Offending recipe
        recipe_id: RecipeId,
        /// Unresolvable ingredient reference
        ingredient_id: IngredientId,
    },
}

impl DataIntegrityWarning {
    /// Recipe the warning refers to
    #[must_use]
    pub const fn recipe_id(&self) -> RecipeId {
        match self {
            Self::EmptyRequirements { recipe_id } | Self::DanglingIngredient { recipe_id, .. } => {
                *recipe_id
            }
        }
    }
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRequirements { recipe_id } => {
                write!(f, "recipe {recipe_id} has no required ingredients")
            }
            Self::DanglingIngredient {
                recipe_id,
                ingredient_id,
            } => write!(
                f,
                "recipe {recipe_id} requires unknown ingredient {ingredient_id}"
            ),
        }
    }
}

/// Result of matching one pantry against the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Cookable recipes ascending by id
    pub cookable: Vec<RecipeSummary>,
    /// Recipes skipped because of inconsistent data
    pub warnings: Vec<DataIntegrityWarning>,
}

/// Select every recipe whose requirements the pantry covers
///
/// A recipe is cookable when the pantry holds at least the required
/// quantity of each required ingredient. Recipes with no requirements or
/// with a dangling requirement are never cookable and produce a warning.
/// Output is ascending by recipe id regardless of input order.
#[must_use]
pub fn match_recipes(pantry: &Pantry, recipes: &[Recipe]) -> MatchReport {
    let mut ordered: Vec<&Recipe> = recipes.iter().collect();
    ordered.sort_by_key(|recipe| recipe.recipe_id);

    let mut report = MatchReport::default();
    for recipe in ordered {
        if recipe.ingredients.is_empty() {
            report.warnings.push(DataIntegrityWarning::EmptyRequirements {
                recipe_id: recipe.recipe_id,
            });
            continue;
        }
        if let Some(dangling) = recipe.ingredients.iter().find(|i| i.is_dangling()) {
            report.warnings.push(DataIntegrityWarning::DanglingIngredient {
                recipe_id: recipe.recipe_id,
                ingredient_id: dangling.ingredient_id,
            });
            continue;
        }

        let covered = recipe
            .ingredients
            .iter()
            .all(|required| pantry.quantity_of(required.ingredient_id) >= required.quantity);
        if covered {
            report.cookable.push(recipe.summary());
        }
    }
    report
}

/// Finds the recipes a user can cook from their current pantry
#[derive(Clone)]
pub struct Matchmaker {
    catalog: Arc<dyn CatalogReader>,
    pantry: Arc<dyn PantryStore>,
    users: Arc<dyn UserDirectory>,
}

impl Matchmaker {
    /// Create a matchmaker over explicit repositories
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        pantry: Arc<dyn PantryStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            catalog,
            pantry,
            users,
        }
    }

    /// Create a matchmaker backed by the `SQLite` repositories
    #[must_use]
    pub fn from_database(db: &Database) -> Self {
        Self::new(
            Arc::new(CatalogRepositoryImpl::new(db.clone())),
            Arc::new(PantryRepositoryImpl::new(db.clone())),
            Arc::new(UserRepositoryImpl::new(db.clone())),
        )
    }

    /// Recipes the user can cook right now, ascending by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, or a storage error
    pub async fn find_cookable(&self, user_id: UserId) -> AppResult<Vec<RecipeSummary>> {
        Ok(self.evaluate(user_id).await?.cookable)
    }

    /// Match the user's pantry and also return the integrity warnings
    ///
    /// Warnings are logged, never raised.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, or a storage error
    pub async fn evaluate(&self, user_id: UserId) -> AppResult<MatchReport> {
        if !self.users.exists(user_id).await? {
            return Err(AppError::not_found(format!("User {user_id}")));
        }

        let pantry = self.pantry.get_pantry(user_id).await?;
        if pantry.is_empty() {
            debug!(user_id = %user_id, "Pantry is empty, nothing to match");
            return Ok(MatchReport::default());
        }

        let recipes = self.catalog.list_recipes().await?;
        let report = match_recipes(&pantry, &recipes);
        for warning in &report.warnings {
            AppLogger::log_data_integrity_warning(warning.recipe_id(), &warning.to_string());
        }

        debug!(
            user_id = %user_id,
            pantry_entries = pantry.len(),
            recipes = recipes.len(),
            cookable = report.cookable.len(),
            "Matchmaking completed"
        );
        Ok(report)
    }
}
