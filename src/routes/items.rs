// ABOUTME: Route handlers for the ingredient catalog
// ABOUTME: Lookup by id, case-insensitive search by name, and creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::errors::AppError;
use crate::models::{CreateItemRequest, IngredientId};
use crate::resources::ServerResources;

/// Ingredient routes implementation
pub struct ItemRoutes;

impl ItemRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/items", post(Self::handle_create))
            .route("/items/:item_id", get(Self::handle_get))
            .route("/items/search/:name", get(Self::handle_search))
            .with_state(resources)
    }

    /// Handle GET /items/:item_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(item_id): Path<IngredientId>,
    ) -> Result<Response, AppError> {
        let item = resources
            .database
            .items()
            .get(item_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {item_id}")))?;
        Ok((StatusCode::OK, Json(item)).into_response())
    }

    /// Handle GET /items/search/:name
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let item = resources
            .database
            .items()
            .find_by_name(&name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item '{name}'")))?;
        Ok((StatusCode::OK, Json(item)).into_response())
    }

    /// Handle POST /items
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateItemRequest>,
    ) -> Result<Response, AppError> {
        let item = resources
            .database
            .items()
            .create(&body.ingredient_name)
            .await?;
        Ok((StatusCode::CREATED, Json(item)).into_response())
    }
}
