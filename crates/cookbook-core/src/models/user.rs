// ABOUTME: User account model and request payloads for user management
// ABOUTME: Usernames are unique and validated on creation and update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::constants::limits::{USERNAME_MAX_LEN, USERNAME_MIN_LEN};
use crate::errors::{AppError, AppResult};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database id
    pub user_id: UserId,
    /// Unique display name
    pub username: String,
    /// Whether the account is active
    pub active: bool,
    /// When the account was created
    pub member_since: DateTime<Utc>,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    /// Requested username
    pub username: String,
    /// Initial active flag, defaults to true
    #[serde(default)]
    pub active: Option<bool>,
}

/// Body of `PUT /users/:uid`; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    /// New username
    #[serde(default)]
    pub username: Option<String>,
    /// New active flag
    #[serde(default)]
    pub active: Option<bool>,
}

/// Trim a username and enforce the length rule
///
/// # Errors
///
/// Returns `InvalidInput` when the trimmed name is not 3 to 30 characters long.
pub fn normalize_username(raw: &str) -> AppResult<String> {
    let username = raw.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(AppError::invalid_input(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    Ok(username.to_owned())
}
