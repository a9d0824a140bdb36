// ABOUTME: Transaction management with RAII guards and retry patterns for SQLite writes.
// ABOUTME: Provides automatic rollback on drop and exponential backoff for lock contention.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! Transaction management with RAII guards and retry patterns
//!
//! This module provides:
//! - `TransactionGuard`: RAII wrapper ensuring automatic rollback if not committed
//! - `retry_transaction`: Exponential backoff for lock and busy recovery
//!
//! ## Example Usage
//!
//! ```text
//! retry_transaction(|| async {
//!     let tx = pool.begin().await?;
//!     let mut guard = TransactionGuard::new(tx);
//!
//!     sqlx::query("UPDATE pantry ...").execute(guard.executor()?).await?;
//!     sqlx::query("DELETE FROM pantry ...").execute(guard.executor()?).await?;
//!
//!     // Explicit commit - if this line isn't reached, transaction rolls back
//!     guard.commit().await?;
//!     Ok(())
//! }, 5).await
//! ```

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use sqlx::{Database, Transaction};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::errors::{AppError, AppResult, CookError, ErrorCode};

/// Errors that can tell whether repeating the failed unit of work may succeed
pub trait RetryableError: Display {
    /// True for transient failures such as lock contention
    fn is_retryable(&self) -> bool;
}

impl RetryableError for AppError {
    fn is_retryable(&self) -> bool {
        match self.code {
            ErrorCode::ResourceLocked => true,
            ErrorCode::DatabaseError => is_retryable_error(&self.message),
            _ => false,
        }
    }
}

impl RetryableError for CookError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Storage(error) => error.is_retryable(),
            _ => false,
        }
    }
}

/// Retry a transaction operation if it fails with a retryable error
///
/// Non-retryable errors (constraint violations, missing rows, validation
/// failures) are propagated immediately. When the attempt budget runs out the
/// last error is returned, so callers can check `is_retryable()` on it to
/// tell exhaustion apart from a hard failure.
///
/// # Errors
/// * Returns the error of the last attempt, or the first non-retryable error
///
/// # Exponential Backoff
/// - Attempt 1: 20ms
/// - Attempt 2: 40ms
/// - Attempt 3: 80ms
/// - Attempt 4: 160ms
pub async fn retry_transaction<F, Fut, T, E>(mut f: F, max_attempts: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError,
{
    let mut attempts: u32 = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempts += 1;
                if !e.is_retryable() {
                    debug!(
                        attempts = attempts,
                        error = %e,
                        "Transaction failed with non-retryable error"
                    );
                    return Err(e);
                }
                if attempts >= max_attempts {
                    error!(
                        attempts = attempts,
                        max_attempts = max_attempts,
                        error = %e,
                        "Transaction failed after max retries"
                    );
                    return Err(e);
                }

                // Exponential backoff: 20ms, 40ms, 80ms, 160ms, ...
                let backoff_ms = 10_u64 << attempts.min(10);
                warn!(
                    attempt = attempts,
                    max_attempts = max_attempts,
                    backoff_ms = backoff_ms,
                    error = %e,
                    "Transaction failed with retryable error, retrying after backoff"
                );
                sleep(Duration::from_millis(backoff_ms)).await;
            }
        }
    }
}

/// Check if a database error message describes a transient condition
///
/// `SQLite` reports contention as "database is locked" (`SQLITE_BUSY`) or
/// "database table is locked" (`SQLITE_LOCKED`); pool exhaustion shows up as
/// a timeout. Constraint violations are never retried.
fn is_retryable_error(error_msg: &str) -> bool {
    let error_lower = error_msg.to_lowercase();

    if error_lower.contains("constraint") {
        return false;
    }

    error_lower.contains("locked")
        || error_lower.contains("busy")
        || error_lower.contains("timeout")
        || error_lower.contains("timed out")
}

/// RAII guard for database transactions ensuring automatic rollback on drop
///
/// If an error occurs before `commit()`, the guard is dropped and the
/// transaction is rolled back by `SQLx`.
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
    committed: bool,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Create a new transaction guard from an existing `SQLx` transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        debug!("TransactionGuard created - transaction will auto-rollback if not committed");
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction was already consumed or the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.commit()
                    .await
                    .map_err(|e| AppError::database(format!("Transaction commit failed: {e}")))?;
                self.committed = true;
                debug!("TransactionGuard committed successfully");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot commit",
            )),
        }
    }

    /// Explicitly rollback the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback operation fails
    pub async fn rollback(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.rollback()
                    .await
                    .map_err(|e| AppError::database(format!("Transaction rollback failed: {e}")))?;
                debug!("TransactionGuard rolled back explicitly");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot rollback",
            )),
        }
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Get a mutable reference to the underlying connection for executing queries
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction has already been committed or rolled back.
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            warn!(
                "TransactionGuard dropped without commit - transaction will be rolled back automatically"
            );
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;
