// ABOUTME: Route handlers for the recipe catalog
// ABOUTME: Atomic create and rewrite of full recipes, lookup and paged summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::constants::limits::MAX_RECIPE_LIST_LIMIT;
use crate::errors::AppError;
use crate::models::{RecipeDraft, RecipeId};
use crate::resources::ServerResources;

/// Response of a recipe write
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeWriteResponse {
    /// Human readable outcome
    pub message: String,
    /// Written recipe
    pub recipe_id: RecipeId,
}

/// Query parameters of `GET /recipes`
#[derive(Debug, Deserialize, Default)]
pub struct ListRecipesQuery {
    /// Maximum number of summaries, all when omitted
    pub limit: Option<u32>,
}

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/recipes", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/recipes/:recipe_id",
                get(Self::handle_get).put(Self::handle_update),
            )
            .with_state(resources)
    }

    /// Handle GET /recipes?limit=n
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListRecipesQuery>,
    ) -> Result<Response, AppError> {
        let limit = match query.limit {
            Some(0) => return Err(AppError::out_of_range("limit must be at least 1")),
            limit => limit.map(|n| n.min(MAX_RECIPE_LIST_LIMIT)),
        };
        let summaries = resources
            .database
            .recipes()
            .list_summaries(limit)
            .await?;
        Ok((StatusCode::OK, Json(summaries)).into_response())
    }

    /// Handle POST /recipes
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(draft): Json<RecipeDraft>,
    ) -> Result<Response, AppError> {
        let recipe_id = resources.database.recipes().create(draft).await?;
        let response = RecipeWriteResponse {
            message: "Recipe created".to_owned(),
            recipe_id,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /recipes/:recipe_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<RecipeId>,
    ) -> Result<Response, AppError> {
        let recipe = resources
            .database
            .recipes()
            .get(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle PUT /recipes/:recipe_id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<RecipeId>,
        Json(draft): Json<RecipeDraft>,
    ) -> Result<Response, AppError> {
        if !resources.database.recipes().update(recipe_id, draft).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        let response = RecipeWriteResponse {
            message: "Recipe updated".to_owned(),
            recipe_id,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
