// ABOUTME: Pantry inventory models and the records produced by cooking a recipe
// ABOUTME: Includes shortfall reports for failed cooks and per-ingredient deltas for successful ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{IngredientId, RecipeId, UserId};

/// On-hand quantities of one user, keyed by ingredient
///
/// Stored entries always hold a positive amount; absent ingredients read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pantry {
    entries: BTreeMap<IngredientId, i64>,
}

impl Pantry {
    /// Quantity held for an ingredient
    #[must_use]
    pub fn quantity_of(&self, ingredient_id: IngredientId) -> i64 {
        self.entries.get(&ingredient_id).copied().unwrap_or(0)
    }

    /// True when the user holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct ingredients held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate entries in ingredient id order
    pub fn iter(&self) -> impl Iterator<Item = (IngredientId, i64)> + '_ {
        self.entries.iter().map(|(id, amount)| (*id, *amount))
    }
}

impl FromIterator<(IngredientId, i64)> for Pantry {
    fn from_iter<I: IntoIterator<Item = (IngredientId, i64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One pantry row with its ingredient name, as listed by `GET /pantry/:uid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryEntry {
    /// Catalog ingredient
    pub ingredient_id: IngredientId,
    /// Catalog name
    pub ingredient_name: String,
    /// Quantity on hand
    pub amount: i64,
}

/// Direction of a manual pantry change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PantryAction {
    /// Increase the stored amount, creating the entry if needed
    Add,
    /// Decrease the stored amount, deleting the entry at zero
    Remove,
}

/// Body of `POST /pantry/:uid`
#[derive(Debug, Clone, Deserialize)]
pub struct PantryUpdateRequest {
    /// Ingredient to change, matched case-insensitively
    pub ingredient_name: String,
    /// Amount to add or remove
    pub amount: i64,
    /// Whether to add or remove
    pub action: PantryAction,
}

/// An ingredient the pantry cannot cover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Required ingredient
    pub ingredient_id: IngredientId,
    /// Catalog name when the ingredient still exists
    pub ingredient_name: Option<String>,
    /// Quantity the recipe needs
    pub required: i64,
    /// Quantity the pantry holds
    pub available: i64,
    /// `required - available`
    pub missing: i64,
}

impl Shortfall {
    /// Build a shortfall, deriving the missing quantity
    #[must_use]
    pub const fn new(
        ingredient_id: IngredientId,
        ingredient_name: Option<String>,
        required: i64,
        available: i64,
    ) -> Self {
        Self {
            ingredient_id,
            ingredient_name,
            required,
            available,
            missing: required - available,
        }
    }
}

/// Change applied to one pantry entry by a successful cook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryDelta {
    /// Consumed ingredient
    pub ingredient_id: IngredientId,
    /// Catalog name
    pub ingredient_name: String,
    /// Amount before cooking
    pub previous: i64,
    /// Amount the recipe used
    pub consumed: i64,
    /// Amount left afterwards, 0 when the entry was removed
    pub remaining: i64,
    /// True when the entry was deleted
    pub removed: bool,
}

/// Outcome of a successful cook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookResult {
    /// Cook
    pub user_id: UserId,
    /// Prepared recipe
    pub recipe_id: RecipeId,
    /// Name of the prepared recipe
    pub recipe_name: String,
    /// Per-ingredient changes in ingredient id order
    pub consumed: Vec<PantryDelta>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_ingredient_reads_as_zero() {
        let pantry: Pantry = [(IngredientId::new(1), 500)].into_iter().collect();

        assert_eq!(pantry.quantity_of(IngredientId::new(1)), 500);
        assert_eq!(pantry.quantity_of(IngredientId::new(2)), 0);
        assert_eq!(pantry.len(), 1);
    }

    #[test]
    fn test_shortfall_missing_quantity() {
        let shortfall = Shortfall::new(IngredientId::new(4), Some("rice".into()), 300, 200);
        assert_eq!(shortfall.missing, 100);
    }

    #[test]
    fn test_pantry_action_wire_format() {
        let request: PantryUpdateRequest = serde_json::from_str(
            r#"{"ingredient_name": "Egg", "amount": 3, "action": "remove"}"#,
        )
        .unwrap();
        assert_eq!(request.action, PantryAction::Remove);
    }
}
