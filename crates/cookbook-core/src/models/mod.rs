// ABOUTME: Core data models for the CloudCookbook backend
// ABOUTME: Re-exports users, ingredients, recipes, pantries, and cook results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! # Data Models
//!
//! Plain data shared by the storage layer, the matchmaking engine, and the
//! HTTP routes. Request types validate and normalize themselves so every
//! entry point applies the same field rules.

mod ids;
mod ingredient;
mod pantry;
mod recipe;
mod user;

pub use ids::{IngredientId, RecipeId, UserId};
pub use ingredient::{normalize_ingredient_name, CreateItemRequest, Ingredient};
pub use pantry::{
    CookResult, Pantry, PantryAction, PantryDelta, PantryEntry, PantryUpdateRequest, Shortfall,
};
pub use recipe::{Recipe, RecipeDraft, RecipeIngredient, RecipeSummary};
pub use user::{normalize_username, CreateUserRequest, UpdateUserRequest, User};
