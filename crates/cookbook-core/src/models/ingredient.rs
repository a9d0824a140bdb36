// ABOUTME: Catalog ingredient model and ingredient name normalization
// ABOUTME: Names are stored lowercase and trimmed so lookups are case-insensitive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use serde::{Deserialize, Serialize};

use super::IngredientId;
use crate::constants::limits::{INGREDIENT_NAME_MAX_LEN, INGREDIENT_NAME_MIN_LEN};
use crate::errors::{AppError, AppResult};

/// A global ingredient record, shared by every pantry and recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Catalog id
    pub ingredient_id: IngredientId,
    /// Normalized name
    pub ingredient_name: String,
}

/// Body of `POST /items`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    /// Name of the new ingredient, normalized before storage
    pub ingredient_name: String,
}

/// Lowercase and trim an ingredient name, enforcing the length rule
///
/// # Errors
///
/// Returns `InvalidInput` when the normalized name is shorter than 2 or
/// longer than 30 characters.
pub fn normalize_ingredient_name(raw: &str) -> AppResult<String> {
    let name = raw.trim().to_lowercase();
    let len = name.chars().count();
    if !(INGREDIENT_NAME_MIN_LEN..=INGREDIENT_NAME_MAX_LEN).contains(&len) {
        return Err(AppError::invalid_input(format!(
            "Ingredient name must be between {INGREDIENT_NAME_MIN_LEN} and {INGREDIENT_NAME_MAX_LEN} characters, got '{name}'"
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ingredient_name() {
        assert_eq!(normalize_ingredient_name("  Olive Oil ").unwrap(), "olive oil");
        assert!(normalize_ingredient_name(" x ").is_err());
        assert!(normalize_ingredient_name(&"a".repeat(31)).is_err());
    }
}
