// ABOUTME: Recipe catalog models and the validated recipe draft used for create/update
// ABOUTME: A recipe owns ordered instruction steps and a required-ingredients mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{normalize_ingredient_name, IngredientId, RecipeId, UserId};
use crate::constants::limits::{
    DESCRIPTION_MAX_LEN, RECIPE_NAME_MAX_LEN, RECIPE_NAME_MIN_LEN, TIME_NEEDED_MAX_MINUTES,
};
use crate::errors::{AppError, AppResult};

/// One required ingredient of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Referenced catalog ingredient
    pub ingredient_id: IngredientId,
    /// Catalog name, `None` when the reference no longer resolves
    pub ingredient_name: Option<String>,
    /// Quantity consumed by one preparation
    pub quantity: i64,
}

impl RecipeIngredient {
    /// True when the referenced ingredient is missing from the catalog
    #[must_use]
    pub const fn is_dangling(&self) -> bool {
        self.ingredient_name.is_none()
    }
}

/// A full recipe with its steps and requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Catalog id
    pub recipe_id: RecipeId,
    /// Normalized name
    pub recipe_name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Author, `None` once the author account is gone
    pub recipe_creator: Option<UserId>,
    /// Preparation time in minutes
    pub time_needed: u32,
    /// Instruction steps in order
    pub instructions: Vec<String>,
    /// Required ingredients ordered by ingredient id
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Project the listing view of this recipe
    #[must_use]
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            recipe_id: self.recipe_id,
            recipe_name: self.recipe_name.clone(),
            description: self.description.clone(),
            recipe_creator: self.recipe_creator,
            time_needed: self.time_needed,
        }
    }
}

/// Listing view of a recipe, returned by matchmaking and `GET /recipes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Catalog id
    pub recipe_id: RecipeId,
    /// Normalized name
    pub recipe_name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Author
    pub recipe_creator: Option<UserId>,
    /// Preparation time in minutes
    pub time_needed: u32,
}

/// Body of `POST /recipes` and `PUT /recipes/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDraft {
    /// Recipe name
    pub recipe_name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Author, defaults to the admin account when omitted
    #[serde(default)]
    pub recipe_creator: Option<UserId>,
    /// Preparation time in minutes
    pub time_needed: u32,
    /// Ingredient name to required quantity
    pub recipe_ingredients: BTreeMap<String, i64>,
    /// Instruction steps in order
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl RecipeDraft {
    /// Apply the field rules and return the normalized draft
    ///
    /// Names and steps are lowercased and trimmed, blank steps are dropped,
    /// and ingredient names that collide after normalization are rejected.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `ValueOutOfRange` describing the first
    /// violated rule.
    pub fn validated(self) -> AppResult<Self> {
        let recipe_name = self.recipe_name.trim().to_lowercase();
        let name_len = recipe_name.chars().count();
        if !(RECIPE_NAME_MIN_LEN..=RECIPE_NAME_MAX_LEN).contains(&name_len) {
            return Err(AppError::invalid_input(format!(
                "Recipe name must be between {RECIPE_NAME_MIN_LEN} and {RECIPE_NAME_MAX_LEN} characters"
            )));
        }

        let description = self
            .description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        if description
            .as_ref()
            .is_some_and(|text| text.chars().count() > DESCRIPTION_MAX_LEN)
        {
            return Err(AppError::invalid_input(format!(
                "Description must be at most {DESCRIPTION_MAX_LEN} characters"
            )));
        }

        if self.time_needed == 0 || self.time_needed > TIME_NEEDED_MAX_MINUTES {
            return Err(AppError::out_of_range(format!(
                "time_needed must be between 1 and {TIME_NEEDED_MAX_MINUTES} minutes"
            )));
        }

        if self.recipe_ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "A recipe needs at least one ingredient",
            ));
        }
        let mut recipe_ingredients = BTreeMap::new();
        for (raw_name, quantity) in self.recipe_ingredients {
            let name = normalize_ingredient_name(&raw_name)?;
            if quantity <= 0 {
                return Err(AppError::out_of_range(format!(
                    "Quantity for '{name}' must be greater than zero"
                )));
            }
            if recipe_ingredients.insert(name.clone(), quantity).is_some() {
                return Err(AppError::invalid_input(format!(
                    "Ingredient '{name}' is listed more than once"
                )));
            }
        }

        let instructions = self
            .instructions
            .iter()
            .map(|step| step.trim().to_lowercase())
            .filter(|step| !step.is_empty())
            .collect();

        Ok(Self {
            recipe_name,
            description,
            recipe_creator: self.recipe_creator,
            time_needed: self.time_needed,
            recipe_ingredients,
            instructions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            recipe_name: "  Classic Pancakes ".into(),
            description: Some("Fluffy".into()),
            recipe_creator: None,
            time_needed: 20,
            recipe_ingredients: BTreeMap::from([("Flour".into(), 300), ("egg".into(), 2)]),
            instructions: vec!["  Mix Everything ".into(), "   ".into(), "Fry".into()],
        }
    }

    #[test]
    fn test_draft_is_normalized() {
        let draft = draft().validated().unwrap();

        assert_eq!(draft.recipe_name, "classic pancakes");
        assert_eq!(draft.instructions, vec!["mix everything", "fry"]);
        assert_eq!(draft.recipe_ingredients.get("flour"), Some(&300));
    }

    #[test]
    fn test_draft_rejects_bad_fields() {
        let mut empty = draft();
        empty.recipe_ingredients.clear();
        assert!(empty.validated().is_err());

        let mut slow = draft();
        slow.time_needed = 601;
        assert!(slow.validated().is_err());

        let mut zero = draft();
        zero.recipe_ingredients.insert("milk".into(), 0);
        assert!(zero.validated().is_err());

        let mut duplicate = draft();
        duplicate.recipe_ingredients.insert("FLOUR ".into(), 10);
        assert!(duplicate.validated().is_err());
    }
}
