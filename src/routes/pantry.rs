// ABOUTME: Route handlers for user pantries
// ABOUTME: Lists entries, applies add/remove updates and deletes entries by name
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

use crate::errors::AppError;
use crate::models::{PantryAction, PantryEntry, PantryUpdateRequest, UserId};
use crate::resources::ServerResources;

/// Response of a pantry update
#[derive(Debug, Serialize, Deserialize)]
pub struct PantryUpdateResponse {
    /// Human readable outcome
    pub message: String,
    /// Entry after the update, absent when it was removed
    pub entry: Option<PantryEntry>,
}

/// Query parameters of `DELETE /pantry/:user_id`
#[derive(Debug, Deserialize)]
pub struct RemoveFromPantryQuery {
    /// Ingredient to remove
    pub ingredient_name: String,
    /// Amount to remove, everything when omitted
    pub amount: Option<i64>,
}

/// Pantry routes implementation
pub struct PantryRoutes;

impl PantryRoutes {
    /// Create all pantry routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/pantry/:user_id",
                get(Self::handle_list)
                    .post(Self::handle_update)
                    .delete(Self::handle_remove),
            )
            .with_state(resources)
    }

    /// Handle GET /pantry/:user_id
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
    ) -> Result<Response, AppError> {
        let entries = resources.database.pantry().list_entries(user_id).await?;
        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    /// Handle POST /pantry/:user_id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
        Json(body): Json<PantryUpdateRequest>,
    ) -> Result<Response, AppError> {
        let entry = resources
            .database
            .pantry()
            .apply_update(user_id, &body)
            .await?;

        let verb = match body.action {
            PantryAction::Add => "added to",
            PantryAction::Remove => "removed from",
        };
        let response = PantryUpdateResponse {
            message: format!("Ingredient {verb} pantry of user {user_id}"),
            entry,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle DELETE /pantry/:user_id?ingredient_name=..&amount=..
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
        Query(query): Query<RemoveFromPantryQuery>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .pantry()
            .remove(user_id, &query.ingredient_name, query.amount)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
