// ABOUTME: Integration tests for manual pantry updates
// ABOUTME: Covers upserts, ingredient auto-creation, removal to zero and validation failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors
#![allow(clippy::unwrap_used)]

mod common;

use anyhow::Result;
use cloudcookbook::errors::ErrorCode;
use cloudcookbook::models::{PantryAction, PantryUpdateRequest, UserId};
use common::{create_test_database, create_user, ingredient_id, pantry_snapshot, stock};

fn request(name: &str, amount: i64, action: PantryAction) -> PantryUpdateRequest {
    PantryUpdateRequest {
        ingredient_name: name.to_owned(),
        amount,
        action,
    }
}

#[tokio::test]
async fn test_add_accumulates_and_creates_unknown_ingredients() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_user(&database, "admin").await?;

    stock(&database, user.user_id, "Flour", 200).await?;
    let entry = database
        .pantry()
        .apply_update(user.user_id, &request("  flour ", 300, PantryAction::Add))
        .await?
        .unwrap();

    assert_eq!(entry.ingredient_name, "flour");
    assert_eq!(entry.amount, 500);
    assert_eq!(database.items().count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_remove_subtracts_then_deletes_at_zero() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_user(&database, "admin").await?;
    stock(&database, user.user_id, "egg", 6).await?;

    let entry = database
        .pantry()
        .apply_update(user.user_id, &request("egg", 4, PantryAction::Remove))
        .await?
        .unwrap();
    assert_eq!(entry.amount, 2);

    let entry = database
        .pantry()
        .apply_update(user.user_id, &request("egg", 5, PantryAction::Remove))
        .await?;
    assert!(entry.is_none());
    assert!(pantry_snapshot(&database, user.user_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_remove_without_amount_deletes_the_entry() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_user(&database, "admin").await?;
    stock(&database, user.user_id, "milk", 1000).await?;
    stock(&database, user.user_id, "sugar", 10).await?;

    database.pantry().remove(user.user_id, "MILK", None).await?;

    assert_eq!(
        pantry_snapshot(&database, user.user_id).await?,
        vec![("sugar".to_owned(), 10)]
    );
    Ok(())
}

#[tokio::test]
async fn test_removing_absent_ingredient_is_not_found() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_user(&database, "admin").await?;
    database.items().create("basil").await?;

    let error = database
        .pantry()
        .apply_update(user.user_id, &request("basil", 1, PantryAction::Remove))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let error = database
        .pantry()
        .remove(user.user_id, "unobtainium", None)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_invalid_updates_are_rejected() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_user(&database, "admin").await?;

    let error = database
        .pantry()
        .apply_update(user.user_id, &request("flour", 0, PantryAction::Add))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let error = database
        .pantry()
        .apply_update(user.user_id, &request("x", 5, PantryAction::Add))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let error = database
        .pantry()
        .apply_update(UserId::new(77), &request("flour", 5, PantryAction::Add))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_listing_unknown_user_is_not_found() -> Result<()> {
    let database = create_test_database().await?;

    let error = database
        .pantry()
        .list_entries(UserId::new(5))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_add_past_maximum_quantity_is_rejected() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_user(&database, "admin").await?;
    stock(&database, user.user_id, "flour", i64::MAX).await?;

    let error = database
        .pantry()
        .apply_update(user.user_id, &request("flour", 1, PantryAction::Add))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(
        pantry_snapshot(&database, user.user_id).await?,
        vec![("flour".to_owned(), i64::MAX)]
    );
    Ok(())
}

#[tokio::test]
async fn test_zero_quantity_rows_cannot_be_stored() -> Result<()> {
    let database = create_test_database().await?;
    let user = create_user(&database, "admin").await?;
    database.items().create("salt").await?;
    let salt = ingredient_id(&database, "salt").await?;

    let result = sqlx::query("INSERT INTO pantry (user_id, ingredient_id, amount) VALUES ($1, $2, 0)")
        .bind(user.user_id.get())
        .bind(salt.get())
        .execute(database.pool())
        .await;

    assert!(result.is_err());
    assert!(pantry_snapshot(&database, user.user_id).await?.is_empty());
    Ok(())
}
