// ABOUTME: Integration tests for the ingredient, user and recipe managers
// ABOUTME: Covers normalization, uniqueness, atomic recipe writes and in-place rewrites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors
#![allow(clippy::unwrap_used)]

mod common;

use std::collections::BTreeMap;

use anyhow::Result;
use cloudcookbook::errors::ErrorCode;
use cloudcookbook::models::{
    CreateUserRequest, IngredientId, RecipeDraft, RecipeId, UpdateUserRequest, UserId,
};
use common::{create_recipe, create_test_database, create_user};

fn draft(name: &str, ingredients: &[(&str, i64)], steps: &[&str]) -> RecipeDraft {
    RecipeDraft {
        recipe_name: name.to_owned(),
        description: Some("  quick and easy ".to_owned()),
        recipe_creator: None,
        time_needed: 25,
        recipe_ingredients: ingredients
            .iter()
            .map(|(n, q)| ((*n).to_owned(), *q))
            .collect::<BTreeMap<_, _>>(),
        instructions: steps.iter().map(|s| (*s).to_owned()).collect(),
    }
}

#[tokio::test]
async fn test_items_are_unique_ignoring_case() -> Result<()> {
    let database = create_test_database().await?;

    let tomato = database.items().create("  Tomato ").await?;
    assert_eq!(tomato.ingredient_name, "tomato");

    let error = database.items().create("TOMATO").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);

    let found = database.items().find_by_name("ToMaTo").await?.unwrap();
    assert_eq!(found.ingredient_id, tomato.ingredient_id);
    assert!(database.items().get(IngredientId::new(999)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_users_create_update_and_conflict() -> Result<()> {
    let database = create_test_database().await?;
    let admin = create_user(&database, "admin").await?;
    create_user(&database, "nerd_tubbe").await?;
    assert!(admin.active);

    let error = database
        .users()
        .create(&CreateUserRequest {
            username: "admin".to_owned(),
            active: None,
        })
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);

    let updated = database
        .users()
        .update(
            admin.user_id,
            &UpdateUserRequest {
                username: None,
                active: Some(false),
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.username, "admin");
    assert!(!updated.active);

    let error = database
        .users()
        .update(
            admin.user_id,
            &UpdateUserRequest {
                username: Some("nerd_tubbe".to_owned()),
                active: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceAlreadyExists);

    assert!(database
        .users()
        .update(UserId::new(404), &UpdateUserRequest::default())
        .await?
        .is_none());
    assert_eq!(
        database.users().find_by_username("admin").await?.unwrap().user_id,
        admin.user_id
    );
    Ok(())
}

#[tokio::test]
async fn test_recipe_create_normalizes_and_orders_steps() -> Result<()> {
    let database = create_test_database().await?;
    let admin = create_user(&database, "admin").await?;

    let recipe_id = database
        .recipes()
        .create(draft(
            "Classic Pancakes",
            &[("Flour", 300), ("milk", 500), ("Egg", 2)],
            &["Mix dry", "  ", "Whisk wet", "Fry"],
        ))
        .await?;

    let recipe = database.recipes().get(recipe_id).await?.unwrap();
    assert_eq!(recipe.recipe_name, "classic pancakes");
    assert_eq!(recipe.description.as_deref(), Some("quick and easy"));
    assert_eq!(recipe.recipe_creator, Some(admin.user_id));
    assert_eq!(recipe.instructions, vec!["mix dry", "whisk wet", "fry"]);
    let mut names: Vec<_> = recipe
        .ingredients
        .iter()
        .map(|i| (i.ingredient_name.clone().unwrap(), i.quantity))
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            ("egg".to_owned(), 2),
            ("flour".to_owned(), 300),
            ("milk".to_owned(), 500)
        ]
    );
    assert_eq!(database.items().count().await?, 3);
    Ok(())
}

#[tokio::test]
async fn test_invalid_recipe_writes_nothing() -> Result<()> {
    let database = create_test_database().await?;
    create_user(&database, "admin").await?;

    let mut bad_time = draft("stew", &[("beef", 500)], &["simmer"]);
    bad_time.time_needed = 0;
    let error = database.recipes().create(bad_time).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);

    let mut unknown_creator = draft("stew", &[("beef", 500)], &["simmer"]);
    unknown_creator.recipe_creator = Some(UserId::new(9));
    let error = database.recipes().create(unknown_creator).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);

    let error = database
        .recipes()
        .create(draft("stew", &[("Beef", 500), ("beef", 100)], &[]))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    assert!(database.recipes().list_summaries(None).await?.is_empty());
    assert_eq!(database.items().count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_recipe_update_rewrites_steps_and_ingredients() -> Result<()> {
    let database = create_test_database().await?;
    create_user(&database, "admin").await?;
    let recipe_id = create_recipe(&database, "toast", &[("bread", 2), ("butter", 10)]).await?;

    let updated = database
        .recipes()
        .update(recipe_id, draft("French Toast", &[("bread", 2), ("egg", 1)], &["soak", "fry"]))
        .await?;
    assert!(updated);

    let recipe = database.recipes().get(recipe_id).await?.unwrap();
    assert_eq!(recipe.recipe_name, "french toast");
    assert_eq!(recipe.instructions, vec!["soak", "fry"]);
    let names: Vec<_> = recipe
        .ingredients
        .iter()
        .filter_map(|i| i.ingredient_name.clone())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"egg".to_owned()));
    assert!(!names.contains(&"butter".to_owned()));

    assert!(!database
        .recipes()
        .update(RecipeId::new(99), draft("ghost", &[("air", 1)], &[]))
        .await?);
    Ok(())
}

#[tokio::test]
async fn test_list_summaries_respects_limit() -> Result<()> {
    let database = create_test_database().await?;
    create_user(&database, "admin").await?;
    let first = create_recipe(&database, "soup", &[("water", 500)]).await?;
    let second = create_recipe(&database, "salad", &[("lettuce", 1)]).await?;
    create_recipe(&database, "tea", &[("water", 250)]).await?;

    let all = database.recipes().list_summaries(None).await?;
    assert_eq!(all.len(), 3);

    let limited = database.recipes().list_summaries(Some(2)).await?;
    let ids: Vec<_> = limited.iter().map(|s| s.recipe_id).collect();
    assert_eq!(ids, vec![first, second]);
    Ok(())
}
