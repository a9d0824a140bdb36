// ABOUTME: Database operations for per-user pantry inventories
// ABOUTME: Manual add/remove updates and the write-locked unit of work used when cooking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::items::{find_id_by_name, find_or_create};
use super::transactions::{retry_transaction, SqliteTransactionGuard};
use crate::constants::defaults::PANTRY_WRITE_ATTEMPTS;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    normalize_ingredient_name, IngredientId, Pantry, PantryAction, PantryEntry,
    PantryUpdateRequest, UserId,
};

/// Pantry manager
#[derive(Clone)]
pub struct PantryManager {
    pool: SqlitePool,
}

impl PantryManager {
    /// Create a new pantry manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read a user's on-hand quantities
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_pantry(&self, user_id: UserId) -> AppResult<Pantry> {
        let rows = sqlx::query("SELECT ingredient_id, amount FROM pantry WHERE user_id = $1")
            .bind(user_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read pantry: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| (IngredientId::new(row.get("ingredient_id")), row.get("amount")))
            .collect())
    }

    /// List a user's pantry with ingredient names, ordered by ingredient id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user, or a database error
    pub async fn list_entries(&self, user_id: UserId) -> AppResult<Vec<PantryEntry>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        ensure_user_exists(&mut conn, user_id).await?;

        let rows = sqlx::query(
            r"
            SELECT p.ingredient_id, i.ingredient_name, p.amount
            FROM pantry p
            JOIN items i ON i.ingredient_id = p.ingredient_id
            WHERE p.user_id = $1
            ORDER BY p.ingredient_id
            ",
        )
        .bind(user_id.get())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to list pantry: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| PantryEntry {
                ingredient_id: IngredientId::new(row.get("ingredient_id")),
                ingredient_name: row.get("ingredient_name"),
                amount: row.get("amount"),
            })
            .collect())
    }

    /// Apply a manual add or remove
    ///
    /// `add` upserts the entry and creates unknown ingredients. `remove`
    /// subtracts and deletes the entry once it reaches zero. Returns the
    /// resulting entry, or `None` when it was deleted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive amount or bad name,
    /// `ResourceNotFound` for an unknown user or an ingredient missing from
    /// the pantry, or a database error
    pub async fn apply_update(
        &self,
        user_id: UserId,
        request: &PantryUpdateRequest,
    ) -> AppResult<Option<PantryEntry>> {
        if request.amount <= 0 {
            return Err(AppError::invalid_input("Amount must be greater than zero"));
        }
        let ingredient_name = normalize_ingredient_name(&request.ingredient_name)?;

        let pool = &self.pool;
        let name = ingredient_name.as_str();
        let entry = retry_transaction(
            || async move {
                let mut guard = begin_write(pool, user_id).await?;
                ensure_user_exists(guard.executor()?, user_id).await?;

                let entry = match request.action {
                    PantryAction::Add => {
                        Some(add_amount(guard.executor()?, user_id, name, request.amount).await?)
                    }
                    PantryAction::Remove => {
                        remove_amount(guard.executor()?, user_id, name, Some(request.amount))
                            .await?
                    }
                };
                guard.commit().await?;
                Ok::<_, AppError>(entry)
            },
            PANTRY_WRITE_ATTEMPTS,
        )
        .await?;

        AppLogger::log_pantry_update(
            user_id,
            &ingredient_name,
            request.action,
            request.amount,
            entry.as_ref().map_or(0, |e| e.amount),
        );
        Ok(entry)
    }

    /// Remove an ingredient from a pantry entirely, or by `amount` when given
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown user or an ingredient missing
    /// from the pantry, `InvalidInput` for a non-positive amount, or a
    /// database error
    pub async fn remove(
        &self,
        user_id: UserId,
        raw_name: &str,
        amount: Option<i64>,
    ) -> AppResult<Option<PantryEntry>> {
        if amount.is_some_and(|a| a <= 0) {
            return Err(AppError::invalid_input("Amount must be greater than zero"));
        }
        let ingredient_name = raw_name.trim().to_lowercase();

        let pool = &self.pool;
        let name = ingredient_name.as_str();
        let entry = retry_transaction(
            || async move {
                let mut guard = begin_write(pool, user_id).await?;
                ensure_user_exists(guard.executor()?, user_id).await?;
                let entry = remove_amount(guard.executor()?, user_id, name, amount).await?;
                guard.commit().await?;
                Ok::<_, AppError>(entry)
            },
            PANTRY_WRITE_ATTEMPTS,
        )
        .await?;

        AppLogger::log_pantry_update(
            user_id,
            &ingredient_name,
            PantryAction::Remove,
            amount.unwrap_or(0),
            entry.as_ref().map_or(0, |e| e.amount),
        );
        Ok(entry)
    }

    /// Open the cook unit of work for a user
    ///
    /// The returned transaction already holds the database write lock.
    ///
    /// # Errors
    ///
    /// Returns a database error, retryable when the lock could not be taken
    pub async fn begin_cook(&self, user_id: UserId) -> AppResult<SqlitePantryTransaction> {
        let guard = begin_write(&self.pool, user_id).await?;
        Ok(SqlitePantryTransaction {
            user_id,
            guard: Some(guard),
        })
    }
}

/// Begin a transaction whose first statement writes the user's pantry rows
///
/// `SQLite` takes the write lock on the first write, so issuing a no-op
/// update before any read serializes concurrent writers at this point
/// instead of failing later on a lock upgrade.
async fn begin_write(
    pool: &SqlitePool,
    user_id: UserId,
) -> AppResult<SqliteTransactionGuard<'static>> {
    let tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
    let mut guard = SqliteTransactionGuard::new(tx);

    sqlx::query("UPDATE pantry SET amount = amount WHERE user_id = $1")
        .bind(user_id.get())
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to lock pantry: {e}")))?;
    debug!(user_id = %user_id, "Pantry write lock acquired");
    Ok(guard)
}

async fn ensure_user_exists(conn: &mut SqliteConnection, user_id: UserId) -> AppResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE user_id = $1")
        .bind(user_id.get())
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to check user: {e}")))?;
    if found.is_none() {
        return Err(AppError::not_found(format!("User {user_id}")));
    }
    Ok(())
}

async fn add_amount(
    conn: &mut SqliteConnection,
    user_id: UserId,
    ingredient_name: &str,
    amount: i64,
) -> AppResult<PantryEntry> {
    let ingredient_id = find_or_create(&mut *conn, ingredient_name).await?;

    let current: i64 = sqlx::query_scalar(
        "SELECT amount FROM pantry WHERE user_id = $1 AND ingredient_id = $2",
    )
    .bind(user_id.get())
    .bind(ingredient_id.get())
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to read pantry entry: {e}")))?
    .unwrap_or(0);
    if current.checked_add(amount).is_none() {
        return Err(AppError::invalid_input(format!(
            "Adding {amount} to '{ingredient_name}' would exceed the maximum pantry quantity"
        )));
    }

    let total: i64 = sqlx::query_scalar(
        r"
        INSERT INTO pantry (user_id, ingredient_id, amount) VALUES ($1, $2, $3)
        ON CONFLICT (user_id, ingredient_id) DO UPDATE SET amount = amount + excluded.amount
        RETURNING amount
        ",
    )
    .bind(user_id.get())
    .bind(ingredient_id.get())
    .bind(amount)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to add to pantry: {e}")))?;

    AppLogger::log_sql(
        "INSERT INTO pantry ... ON CONFLICT DO UPDATE",
        &format!("user_id={user_id} ingredient_id={ingredient_id} amount={amount}"),
    );
    Ok(PantryEntry {
        ingredient_id,
        ingredient_name: ingredient_name.to_owned(),
        amount: total,
    })
}

/// Subtract `amount` (everything when `None`), deleting the row at zero
async fn remove_amount(
    conn: &mut SqliteConnection,
    user_id: UserId,
    ingredient_name: &str,
    amount: Option<i64>,
) -> AppResult<Option<PantryEntry>> {
    let not_in_pantry =
        || AppError::not_found(format!("Ingredient '{ingredient_name}' in pantry of user {user_id}"));

    let ingredient_id = find_id_by_name(&mut *conn, ingredient_name)
        .await?
        .ok_or_else(not_in_pantry)?;

    let current = sqlx::query_scalar::<_, i64>(
        "SELECT amount FROM pantry WHERE user_id = $1 AND ingredient_id = $2",
    )
    .bind(user_id.get())
    .bind(ingredient_id.get())
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to read pantry entry: {e}")))?
    .ok_or_else(not_in_pantry)?;

    let remaining = amount.map_or(0, |a| current - a);
    if remaining <= 0 {
        delete_row(conn, user_id, ingredient_id).await?;
        return Ok(None);
    }

    sqlx::query("UPDATE pantry SET amount = $1 WHERE user_id = $2 AND ingredient_id = $3")
        .bind(remaining)
        .bind(user_id.get())
        .bind(ingredient_id.get())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to update pantry: {e}")))?;
    AppLogger::log_sql(
        "UPDATE pantry SET amount",
        &format!("user_id={user_id} ingredient_id={ingredient_id} amount={remaining}"),
    );

    Ok(Some(PantryEntry {
        ingredient_id,
        ingredient_name: ingredient_name.to_owned(),
        amount: remaining,
    }))
}

async fn delete_row(
    conn: &mut SqliteConnection,
    user_id: UserId,
    ingredient_id: IngredientId,
) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM pantry WHERE user_id = $1 AND ingredient_id = $2")
        .bind(user_id.get())
        .bind(ingredient_id.get())
        .execute(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete pantry entry: {e}")))?;
    AppLogger::log_sql(
        "DELETE FROM pantry",
        &format!("user_id={user_id} ingredient_id={ingredient_id}"),
    );
    Ok(result.rows_affected() > 0)
}

/// Write-locked pantry transaction of one user
///
/// Dropping it without `commit` rolls every change back.
pub struct SqlitePantryTransaction {
    user_id: UserId,
    guard: Option<SqliteTransactionGuard<'static>>,
}

impl SqlitePantryTransaction {
    /// User whose pantry this transaction holds
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    fn connection(&mut self) -> AppResult<&mut SqliteConnection> {
        self.guard
            .as_mut()
            .ok_or_else(|| AppError::internal("Pantry transaction already finished"))?
            .executor()
    }

    fn take_guard(&mut self) -> AppResult<SqliteTransactionGuard<'static>> {
        self.guard
            .take()
            .ok_or_else(|| AppError::internal("Pantry transaction already finished"))
    }

    /// Read the pantry as seen inside the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn pantry(&mut self) -> AppResult<Pantry> {
        let user_id = self.user_id;
        let rows = sqlx::query("SELECT ingredient_id, amount FROM pantry WHERE user_id = $1")
            .bind(user_id.get())
            .fetch_all(self.connection()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to read pantry: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| (IngredientId::new(row.get("ingredient_id")), row.get("amount")))
            .collect())
    }

    /// Subtract `amount` from an entry holding at least that much
    ///
    /// Returns the remaining amount. A row that is missing or holds less
    /// than `amount` yields a retryable `ResourceLocked` error.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` when the guard fails, or a database error
    pub async fn decrement(&mut self, ingredient_id: IngredientId, amount: i64) -> AppResult<i64> {
        let user_id = self.user_id;
        let remaining: Option<i64> = sqlx::query_scalar(
            r"
            UPDATE pantry SET amount = amount - $3
            WHERE user_id = $1 AND ingredient_id = $2 AND amount >= $3
            RETURNING amount
            ",
        )
        .bind(user_id.get())
        .bind(ingredient_id.get())
        .bind(amount)
        .fetch_optional(self.connection()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to decrement pantry: {e}")))?;

        AppLogger::log_sql(
            "UPDATE pantry SET amount = amount - ?",
            &format!("user_id={user_id} ingredient_id={ingredient_id} amount={amount}"),
        );
        remaining.ok_or_else(|| {
            AppError::locked(format!(
                "Pantry entry {ingredient_id} of user {user_id} changed during the transaction"
            ))
        })
    }

    /// Delete an entry, returning whether a row existed
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete_entry(&mut self, ingredient_id: IngredientId) -> AppResult<bool> {
        let user_id = self.user_id;
        delete_row(self.connection()?, user_id, ingredient_id).await
    }

    /// Commit all changes
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction already finished or the commit fails
    pub async fn commit(&mut self) -> AppResult<()> {
        self.take_guard()?.commit().await?;
        info!(user_id = %self.user_id, "Pantry transaction committed");
        Ok(())
    }

    /// Discard all changes
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction already finished or the rollback fails
    pub async fn rollback(&mut self) -> AppResult<()> {
        self.take_guard()?.rollback().await
    }
}
