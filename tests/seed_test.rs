// ABOUTME: Integration tests for catalog seeding
// ABOUTME: Verifies the standard data set, idempotency and the stocked admin pantry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors
#![allow(clippy::unwrap_used)]

mod common;

use std::collections::BTreeSet;

use anyhow::Result;
use cloudcookbook::database::seed::{self, STANDARD_INGREDIENTS, STANDARD_USERS};
use cloudcookbook::matchmaking::{CookExecutor, Matchmaker};
use cloudcookbook::models::UserId;
use common::{create_test_database, pantry_snapshot};

#[tokio::test]
async fn test_seed_populates_empty_database() -> Result<()> {
    let database = create_test_database().await?;
    assert!(seed::is_empty(&database).await?);

    let report = seed::seed_catalog(&database).await?;

    let unique_items: BTreeSet<_> = STANDARD_INGREDIENTS.iter().collect();
    assert_eq!(report.users_created, STANDARD_USERS.len() as u64);
    assert_eq!(report.items_created, unique_items.len() as u64);
    assert_eq!(report.recipes_created, 4);
    assert_eq!(report.pantry_entries, 11);
    assert!(!seed::is_empty(&database).await?);

    let admin = database.users().find_by_username("admin").await?.unwrap();
    assert_eq!(admin.user_id, UserId::new(1));
    Ok(())
}

#[tokio::test]
async fn test_seed_is_idempotent_and_restocks_admin() -> Result<()> {
    let database = create_test_database().await?;
    seed::seed_catalog(&database).await?;
    let stocked = pantry_snapshot(&database, UserId::new(1)).await?;

    let pancakes = database
        .recipes()
        .find_id_by_name("Classic Pancakes")
        .await?
        .unwrap();
    CookExecutor::with_defaults(&database)
        .cook(UserId::new(1), pancakes)
        .await?;
    assert_ne!(pantry_snapshot(&database, UserId::new(1)).await?, stocked);

    let report = seed::seed_catalog(&database).await?;

    assert_eq!(report.users_created, 0);
    assert_eq!(report.items_created, 0);
    assert_eq!(report.recipes_created, 0);
    assert_eq!(pantry_snapshot(&database, UserId::new(1)).await?, stocked);
    assert_eq!(database.recipes().list_summaries(None).await?.len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_admin_can_cook_breakfast_and_pasta_after_seeding() -> Result<()> {
    let database = create_test_database().await?;
    seed::seed_catalog(&database).await?;

    let cookable = Matchmaker::from_database(&database)
        .find_cookable(UserId::new(1))
        .await?;

    let names: Vec<_> = cookable.iter().map(|r| r.recipe_name.as_str()).collect();
    assert_eq!(names, vec!["classic pancakes", "spaghetti aglio e olio"]);
    Ok(())
}
