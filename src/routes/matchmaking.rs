// ABOUTME: Route handlers for matchmaking and cooking
// ABOUTME: Lists cookable recipes for a user and cooks a recipe against their pantry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! Matchmaking routes
//!
//! `GET /matchmaking/:user_id` is read-only. `POST /cook/:user_id/:recipe_id`
//! either consumes every requirement or leaves the pantry untouched; its
//! failure bodies carry the shortfalls or the retry count.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::errors::AppError;
use crate::models::{RecipeId, UserId};
use crate::resources::ServerResources;

/// Matchmaking routes implementation
pub struct MatchmakingRoutes;

impl MatchmakingRoutes {
    /// Create all matchmaking routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/matchmaking/:user_id", get(Self::handle_matchmaking))
            .route("/cook/:user_id/:recipe_id", post(Self::handle_cook))
            .with_state(resources)
    }

    /// Handle GET /matchmaking/:user_id
    async fn handle_matchmaking(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
    ) -> Result<Response, AppError> {
        let cookable = resources.matchmaker.find_cookable(user_id).await?;
        Ok((StatusCode::OK, Json(cookable)).into_response())
    }

    /// Handle POST /cook/:user_id/:recipe_id
    async fn handle_cook(
        State(resources): State<Arc<ServerResources>>,
        Path((user_id, recipe_id)): Path<(UserId, RecipeId)>,
    ) -> Result<Response, AppError> {
        let result = resources.cook_executor.cook(user_id, recipe_id).await?;
        Ok((StatusCode::OK, Json(result)).into_response())
    }
}
