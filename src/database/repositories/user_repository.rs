// ABOUTME: User directory repository implementation
// ABOUTME: Answers existence checks for the matchmaking engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use async_trait::async_trait;

use super::UserDirectory;
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::UserId;

/// `SQLite` implementation of `UserDirectory`
pub struct UserRepositoryImpl {
    db: Database,
}

impl UserRepositoryImpl {
    /// Create a new `UserDirectory` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserDirectory for UserRepositoryImpl {
    async fn exists(&self, user_id: UserId) -> AppResult<bool> {
        self.db.users().exists(user_id).await
    }
}
