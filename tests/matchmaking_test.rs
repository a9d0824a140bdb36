// ABOUTME: Integration tests for the inventory matcher against SQLite
// ABOUTME: Covers cookable selection, ordering, unknown users and inconsistent recipe data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors
#![allow(clippy::unwrap_used)]

mod common;

use anyhow::Result;
use cloudcookbook::errors::ErrorCode;
use cloudcookbook::matchmaking::{DataIntegrityWarning, Matchmaker};
use cloudcookbook::models::{RecipeId, UserId};
use common::{create_recipe, create_test_database, create_user, ingredient_id, stock};

#[tokio::test]
async fn test_find_cookable_selects_covered_recipes_in_id_order() -> Result<()> {
    let database = create_test_database().await?;
    let admin = create_user(&database, "admin").await?;
    stock(&database, admin.user_id, "flour", 500).await?;
    stock(&database, admin.user_id, "egg", 6).await?;
    stock(&database, admin.user_id, "milk", 200).await?;

    let pancakes = create_recipe(
        &database,
        "pancakes",
        &[("flour", 300), ("egg", 2), ("milk", 200)],
    )
    .await?;
    create_recipe(&database, "omelette", &[("egg", 7)]).await?;
    let crepes = create_recipe(&database, "crepes", &[("flour", 100), ("milk", 200)]).await?;

    let cookable = Matchmaker::from_database(&database)
        .find_cookable(admin.user_id)
        .await?;

    let ids: Vec<RecipeId> = cookable.iter().map(|r| r.recipe_id).collect();
    assert_eq!(ids, vec![pancakes, crepes]);
    assert_eq!(cookable[0].recipe_name, "pancakes");
    Ok(())
}

#[tokio::test]
async fn test_missing_ingredient_excludes_recipe() -> Result<()> {
    let database = create_test_database().await?;
    create_user(&database, "admin").await?;
    let cook = create_user(&database, "rice_fan").await?;
    stock(&database, cook.user_id, "rice", 100).await?;
    create_recipe(&database, "fried rice", &[("rice", 200), ("egg", 1)]).await?;

    let cookable = Matchmaker::from_database(&database)
        .find_cookable(cook.user_id)
        .await?;

    assert!(cookable.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_pantry_matches_nothing() -> Result<()> {
    let database = create_test_database().await?;
    let admin = create_user(&database, "admin").await?;
    create_recipe(&database, "toast", &[("bread", 1)]).await?;

    let report = Matchmaker::from_database(&database)
        .evaluate(admin.user_id)
        .await?;

    assert!(report.cookable.is_empty());
    assert!(report.warnings.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_is_not_found() -> Result<()> {
    let database = create_test_database().await?;

    let error = Matchmaker::from_database(&database)
        .find_cookable(UserId::new(42))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_inconsistent_recipes_are_skipped_with_warnings() -> Result<()> {
    let database = create_test_database().await?;
    let admin = create_user(&database, "admin").await?;
    stock(&database, admin.user_id, "flour", 500).await?;
    let bread = create_recipe(&database, "bread", &[("flour", 300)]).await?;
    let saffron_bread =
        create_recipe(&database, "saffron bread", &[("flour", 300), ("saffron", 1)]).await?;

    sqlx::query(
        "INSERT INTO recipes (recipe_name, recipe_creator, time_needed) VALUES ('air', 1, 5)",
    )
    .execute(database.pool())
    .await?;
    let air: i64 = sqlx::query_scalar("SELECT recipe_id FROM recipes WHERE recipe_name = 'air'")
        .fetch_one(database.pool())
        .await?;

    // The in-memory pool has a single connection, so the pragma sticks.
    let saffron = ingredient_id(&database, "saffron").await?;
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(database.pool())
        .await?;
    sqlx::query("DELETE FROM items WHERE ingredient_id = $1")
        .bind(saffron.get())
        .execute(database.pool())
        .await?;

    let report = Matchmaker::from_database(&database)
        .evaluate(admin.user_id)
        .await?;

    let ids: Vec<RecipeId> = report.cookable.iter().map(|r| r.recipe_id).collect();
    assert_eq!(ids, vec![bread]);
    assert_eq!(
        report.warnings,
        vec![
            DataIntegrityWarning::DanglingIngredient {
                recipe_id: saffron_bread,
                ingredient_id: saffron,
            },
            DataIntegrityWarning::EmptyRequirements {
                recipe_id: RecipeId::new(air),
            },
        ]
    );
    Ok(())
}
