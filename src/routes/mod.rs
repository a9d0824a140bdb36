// ABOUTME: Route module organization for CloudCookbook HTTP endpoints
// ABOUTME: Provides route definitions grouped by domain, each a thin layer over the service types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! Route module for CloudCookbook
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the database managers and matchmaking engine.

/// Health check routes
pub mod health;
/// Ingredient catalog routes
pub mod items;
/// Matchmaking and cooking routes
pub mod matchmaking;
/// Pantry routes
pub mod pantry;
/// Recipe catalog routes
pub mod recipes;
/// User routes
pub mod users;

pub use health::HealthRoutes;
pub use items::ItemRoutes;
pub use matchmaking::MatchmakingRoutes;
pub use pantry::PantryRoutes;
pub use recipes::RecipeRoutes;
pub use users::UserRoutes;
