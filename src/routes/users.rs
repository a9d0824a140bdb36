// ABOUTME: Route handlers for user accounts
// ABOUTME: Create, fetch by id or username, and update username or active flag
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
use crate::models::{CreateUserRequest, UpdateUserRequest, UserId};
use crate::resources::ServerResources;

/// User routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/users", post(Self::handle_create))
            .route(
                "/users/:user_id",
                get(Self::handle_get).put(Self::handle_update),
            )
            .route("/users/search/:username", get(Self::handle_search))
            .with_state(resources)
    }

    /// Handle POST /users
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateUserRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.database.users().create(&body).await?;
        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /users/:user_id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .users()
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle GET /users/search/:username
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        Path(username): Path<String>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .users()
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}'")))?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }

    /// Handle PUT /users/:user_id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<UserId>,
        Json(body): Json<UpdateUserRequest>,
    ) -> Result<Response, AppError> {
        let user = resources
            .database
            .users()
            .update(user_id, &body)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")))?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
