// ABOUTME: Database operations for user accounts
// ABOUTME: Handles creation, lookup by id or username, and profile updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{normalize_username, CreateUserRequest, UpdateUserRequest, User, UserId};

/// User account manager
#[derive(Clone)]
pub struct UsersManager {
    pool: SqlitePool,
}

impl UsersManager {
    /// Create a new users manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad username, `ResourceAlreadyExists` when
    /// the username is taken, or a database error
    pub async fn create(&self, request: &CreateUserRequest) -> AppResult<User> {
        let username = normalize_username(&request.username)?;
        let active = request.active.unwrap_or(true);
        let member_since = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (username, active, member_since) VALUES ($1, $2, $3)",
        )
        .bind(&username)
        .bind(active)
        .bind(member_since.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| username_conflict(e, &username))?;

        let user_id = UserId::new(result.last_insert_rowid());
        AppLogger::log_sql("INSERT INTO users", &format!("username={username}"));
        info!(user_id = %user_id, username = %username, "User created");

        Ok(User {
            user_id,
            username,
            active,
            member_since,
        })
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT user_id, username, active, member_since FROM users WHERE user_id = $1",
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Get a user by exact username
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            "SELECT user_id, username, active, member_since FROM users WHERE username = $1",
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Check whether a user exists
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn exists(&self, user_id: UserId) -> AppResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE user_id = $1")
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to check user: {e}")))?;
        Ok(found.is_some())
    }

    /// Update username and/or active flag
    ///
    /// Returns `None` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a bad username, `ResourceAlreadyExists` when
    /// the new username is taken, or a database error
    pub async fn update(
        &self,
        user_id: UserId,
        request: &UpdateUserRequest,
    ) -> AppResult<Option<User>> {
        let Some(current) = self.get(user_id).await? else {
            return Ok(None);
        };

        let username = match &request.username {
            Some(raw) => normalize_username(raw)?,
            None => current.username,
        };
        let active = request.active.unwrap_or(current.active);

        sqlx::query("UPDATE users SET username = $1, active = $2 WHERE user_id = $3")
            .bind(&username)
            .bind(active)
            .bind(user_id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| username_conflict(e, &username))?;

        AppLogger::log_sql(
            "UPDATE users",
            &format!("user_id={user_id} username={username} active={active}"),
        );
        info!(user_id = %user_id, "User updated");

        Ok(Some(User {
            user_id,
            username,
            active,
            member_since: current.member_since,
        }))
    }

    /// Count registered users
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count users: {e}")))
    }
}

fn username_conflict(error: sqlx::Error, username: &str) -> AppError {
    let error = AppError::from(error);
    if error.code == ErrorCode::ResourceAlreadyExists {
        AppError::already_exists(format!("Username '{username}'"))
    } else {
        error
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let member_since_str: String = row.get("member_since");
    let member_since = DateTime::parse_from_rfc3339(&member_since_str)
        .map_err(|e| AppError::internal(format!("Invalid member_since timestamp: {e}")))?
        .with_timezone(&Utc);

    Ok(User {
        user_id: UserId::new(row.get("user_id")),
        username: row.get("username"),
        active: row.get("active"),
        member_since,
    })
}
