// ABOUTME: Cook transaction executor deducting a recipe's requirements from a pantry atomically
// ABOUTME: Re-validates stock under a write lock and retries when concurrent writers interfere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::sync::Arc;

use tracing::{debug, info};

use crate::constants::defaults;
use crate::database::repositories::{
    CatalogReader, CatalogRepositoryImpl, PantryRepositoryImpl, PantryStore, PantryTransaction,
    UserDirectory, UserRepositoryImpl,
};
use crate::database::transactions::{retry_transaction, RetryableError};
use crate::database::Database;
use crate::errors::{AppError, CookError};
use crate::logging::AppLogger;
use crate::models::{
    CookResult, IngredientId, Pantry, PantryDelta, Recipe, RecipeId, Shortfall, UserId,
};

/// Deduction computed for one required ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDeduction {
    /// Ingredient to deduct
    pub ingredient_id: IngredientId,
    /// Catalog name
    pub ingredient_name: String,
    /// Amount held before cooking
    pub previous: i64,
    /// Amount the recipe uses
    pub consumed: i64,
}

impl PlannedDeduction {
    /// Amount left after the deduction
    #[must_use]
    pub const fn remaining(&self) -> i64 {
        self.previous - self.consumed
    }

    /// True when the entry must be deleted instead of decremented
    #[must_use]
    pub const fn depletes(&self) -> bool {
        self.remaining() <= 0
    }
}

/// Plan every deduction a recipe needs, or list everything that is missing
///
/// All requirements are checked before any deduction is planned, so the
/// error side reports every insufficient ingredient rather than the first.
/// Requirements pointing at an unknown ingredient can never be satisfied
/// and are reported with their full quantity missing.
///
/// # Errors
///
/// Returns the shortfalls, in ingredient id order, when any requirement
/// exceeds the pantry
pub fn plan_deductions(
    pantry: &Pantry,
    recipe: &Recipe,
) -> Result<Vec<PlannedDeduction>, Vec<Shortfall>> {
    let mut requirements: Vec<_> = recipe.ingredients.iter().collect();
    requirements.sort_by_key(|required| required.ingredient_id);

    let mut planned = Vec::with_capacity(requirements.len());
    let mut shortfalls = Vec::new();

    for required in requirements {
        let Some(name) = required.ingredient_name.as_ref() else {
            shortfalls.push(Shortfall::new(
                required.ingredient_id,
                None,
                required.quantity,
                0,
            ));
            continue;
        };

        let available = pantry.quantity_of(required.ingredient_id);
        if available < required.quantity {
            shortfalls.push(Shortfall::new(
                required.ingredient_id,
                Some(name.clone()),
                required.quantity,
                available,
            ));
        } else {
            planned.push(PlannedDeduction {
                ingredient_id: required.ingredient_id,
                ingredient_name: name.clone(),
                previous: available,
                consumed: required.quantity,
            });
        }
    }

    if shortfalls.is_empty() {
        Ok(planned)
    } else {
        Err(shortfalls)
    }
}

/// Prepares recipes by consuming their ingredients from a user's pantry
///
/// Each attempt runs inside one pantry transaction: the requirements are
/// re-checked against the pantry as seen under the write lock, then every
/// entry is decremented or deleted, then the transaction commits. Any
/// failure before the commit leaves the pantry untouched.
#[derive(Clone)]
pub struct CookExecutor {
    catalog: Arc<dyn CatalogReader>,
    pantry: Arc<dyn PantryStore>,
    users: Arc<dyn UserDirectory>,
    max_attempts: u32,
}

impl CookExecutor {
    /// Create an executor over explicit repositories
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        pantry: Arc<dyn PantryStore>,
        users: Arc<dyn UserDirectory>,
        max_attempts: u32,
    ) -> Self {
        Self {
            catalog,
            pantry,
            users,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Create an executor backed by the `SQLite` repositories
    #[must_use]
    pub fn from_database(db: &Database, max_attempts: u32) -> Self {
        Self::new(
            Arc::new(CatalogRepositoryImpl::new(db.clone())),
            Arc::new(PantryRepositoryImpl::new(db.clone())),
            Arc::new(UserRepositoryImpl::new(db.clone())),
            max_attempts,
        )
    }

    /// Create an executor with the default attempt budget
    #[must_use]
    pub fn with_defaults(db: &Database) -> Self {
        Self::from_database(db, defaults::COOK_MAX_ATTEMPTS)
    }

    /// Attempt budget for conflicting writers
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Cook a recipe for a user
    ///
    /// # Errors
    ///
    /// - `UserNotFound` / `RecipeNotFound` for unknown ids
    /// - `EmptyRecipe` when the recipe has no requirements
    /// - `InsufficientStock` with every shortfall, pantry unchanged
    /// - `ConflictRetryExhausted` when lock contention outlasts the attempt budget
    /// - `Storage` for any other database failure
    pub async fn cook(&self, user_id: UserId, recipe_id: RecipeId) -> Result<CookResult, CookError> {
        if !self.users.exists(user_id).await? {
            return Err(CookError::UserNotFound(user_id));
        }

        let outcome = retry_transaction(|| self.attempt(user_id, recipe_id), self.max_attempts).await;

        match outcome {
            Ok(result) => {
                AppLogger::log_cook_event(
                    user_id,
                    recipe_id,
                    true,
                    &format!("consumed {} ingredients", result.consumed.len()),
                );
                Ok(result)
            }
            Err(error) if error.is_retryable() => {
                AppLogger::log_cook_event(user_id, recipe_id, false, &error.to_string());
                Err(CookError::ConflictRetryExhausted {
                    user_id,
                    attempts: self.max_attempts,
                })
            }
            Err(error) => {
                AppLogger::log_cook_event(user_id, recipe_id, false, &error.to_string());
                Err(error)
            }
        }
    }

    async fn attempt(&self, user_id: UserId, recipe_id: RecipeId) -> Result<CookResult, CookError> {
        let recipe = self
            .catalog
            .get_recipe(recipe_id)
            .await?
            .ok_or(CookError::RecipeNotFound(recipe_id))?;
        if recipe.ingredients.is_empty() {
            return Err(CookError::EmptyRecipe { recipe_id });
        }

        let mut tx = self.pantry.begin_cook(user_id).await?;
        let pantry = tx.pantry().await?;

        let planned = match plan_deductions(&pantry, &recipe) {
            Ok(planned) => planned,
            Err(shortfalls) => {
                tx.rollback().await?;
                debug!(
                    user_id = %user_id,
                    recipe_id = %recipe_id,
                    missing = shortfalls.len(),
                    "Pantry cannot cover recipe"
                );
                return Err(CookError::InsufficientStock {
                    recipe_id,
                    shortfalls,
                });
            }
        };

        let consumed = match apply_deductions(tx.as_mut(), &planned).await {
            Ok(consumed) => consumed,
            Err(error) => {
                tx.rollback().await?;
                return Err(error.into());
            }
        };
        tx.commit().await?;

        info!(
            user_id = %user_id,
            recipe_id = %recipe_id,
            ingredients = consumed.len(),
            "Recipe cooked"
        );
        Ok(CookResult {
            user_id,
            recipe_id,
            recipe_name: recipe.recipe_name,
            consumed,
        })
    }
}

async fn apply_deductions(
    tx: &mut dyn PantryTransaction,
    planned: &[PlannedDeduction],
) -> Result<Vec<PantryDelta>, AppError> {
    let mut consumed = Vec::with_capacity(planned.len());
    for step in planned {
        let remaining = if step.depletes() {
            if !tx.delete_entry(step.ingredient_id).await? {
                return Err(AppError::locked(format!(
                    "Pantry entry for ingredient {} disappeared",
                    step.ingredient_id
                )));
            }
            0
        } else {
            let remaining = tx.decrement(step.ingredient_id, step.consumed).await?;
            if remaining != step.remaining() {
                return Err(AppError::locked(format!(
                    "Pantry entry for ingredient {} changed during cook",
                    step.ingredient_id
                )));
            }
            remaining
        };

        consumed.push(PantryDelta {
            ingredient_id: step.ingredient_id,
            ingredient_name: step.ingredient_name.clone(),
            previous: step.previous,
            consumed: step.consumed,
            remaining,
            removed: step.depletes(),
        });
    }
    Ok(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeIngredient;

    fn requirement(id: i64, name: &str, quantity: i64) -> RecipeIngredient {
        RecipeIngredient {
            ingredient_id: IngredientId::new(id),
            ingredient_name: Some(name.to_owned()),
            quantity,
        }
    }

    fn pancakes() -> Recipe {
        Recipe {
            recipe_id: RecipeId::new(1),
            recipe_name: "Classic Pancakes".into(),
            description: None,
            recipe_creator: None,
            time_needed: 20,
            instructions: Vec::new(),
            ingredients: vec![
                requirement(3, "egg", 2),
                requirement(1, "flour", 300),
                requirement(2, "milk", 500),
            ],
        }
    }

    fn pantry(entries: &[(i64, i64)]) -> Pantry {
        entries
            .iter()
            .map(|(id, amount)| (IngredientId::new(*id), *amount))
            .collect()
    }

    #[test]
    fn test_plan_orders_by_ingredient_and_flags_depletion() {
        let planned = plan_deductions(&pantry(&[(1, 500), (2, 500), (3, 6)]), &pancakes()).unwrap();

        let ids: Vec<i64> = planned.iter().map(|p| p.ingredient_id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(planned[0].remaining(), 200);
        assert!(planned[1].depletes());
        assert_eq!(planned[2].remaining(), 4);
    }

    #[test]
    fn test_plan_reports_every_shortfall() {
        let shortfalls = plan_deductions(&pantry(&[(1, 100), (3, 1)]), &pancakes()).unwrap_err();

        assert_eq!(
            shortfalls,
            vec![
                Shortfall::new(IngredientId::new(1), Some("flour".into()), 300, 100),
                Shortfall::new(IngredientId::new(2), Some("milk".into()), 500, 0),
                Shortfall::new(IngredientId::new(3), Some("egg".into()), 2, 1),
            ]
        );
    }

    #[test]
    fn test_dangling_requirement_is_unsatisfiable() {
        let mut recipe = pancakes();
        recipe.ingredients[0].ingredient_name = None;

        let shortfalls = plan_deductions(&pantry(&[(1, 500), (2, 500), (3, 6)]), &recipe).unwrap_err();
        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].ingredient_id, IngredientId::new(3));
        assert_eq!(shortfalls[0].missing, 2);
    }
}
