// ABOUTME: HTTP tests for the assembled router using in-process requests
// ABOUTME: Exercises status codes and JSON bodies of the catalog, pantry, matchmaking and cook endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors
#![allow(clippy::unwrap_used)]

mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use cloudcookbook::database::seed;
use cloudcookbook::server::build_router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{create_test_database, create_test_resources};

async fn seeded_app() -> Result<Router> {
    let database = create_test_database().await?;
    seed::seed_catalog(&database).await?;
    Ok(build_router(create_test_resources(database)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = send(&app, Method::GET, "/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_item_endpoints() -> Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/items",
        Some(json!({"ingredient_name": "Dragon Fruit"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ingredient_name"], "dragon fruit");
    let id = body["ingredient_id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/items/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ingredient_name"], "dragon fruit");

    let (status, body) = send(&app, Method::GET, "/items/search/DRAGON%20FRUIT", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ingredient_id"], id);

    let (status, body) = send(
        &app,
        Method::POST,
        "/items",
        Some(json!({"ingredient_name": "dragon fruit"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    let (status, body) = send(&app, Method::GET, "/items/99999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn test_user_endpoints() -> Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(&app, Method::POST, "/users", Some(json!({"username": "chef_kim"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["active"], true);
    let id = body["user_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/users/{id}"),
        Some(json!({"active": false})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "chef_kim");
    assert_eq!(body["active"], false);

    let (status, body) = send(&app, Method::GET, "/users/search/nerd_tubbe", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 4);

    let (status, _) = send(&app, Method::GET, "/users/404", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_recipe_endpoints() -> Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/recipes",
        Some(json!({
            "recipe_name": "Garlic Bread",
            "time_needed": 12,
            "recipe_ingredients": {"bread": 1, "garlic": 2, "butter": 20},
            "instructions": ["Mix garlic and butter", "Spread and bake"]
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["recipe_id"].as_i64().unwrap();
    assert_eq!(id, 5);

    let (status, body) = send(&app, Method::GET, &format!("/recipes/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipe_name"], "garlic bread");
    assert_eq!(body["recipe_creator"], 1);
    assert_eq!(body["instructions"][1], "spread and bake");

    let (status, body) = send(&app, Method::GET, "/recipes?limit=2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["recipe_id"], 1);

    let (status, body) = send(&app, Method::GET, "/recipes", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/recipes/{id}"),
        Some(json!({
            "recipe_name": "Cheesy Garlic Bread",
            "time_needed": 15,
            "recipe_ingredients": {"bread": 1, "garlic": 2, "mozzarella": 50}
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/recipes/999",
        Some(json!({"recipe_name": "ghost", "time_needed": 1, "recipe_ingredients": {"air": 1}})),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::POST,
        "/recipes",
        Some(json!({"recipe_name": "nothing", "time_needed": 5, "recipe_ingredients": {}})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    Ok(())
}

#[tokio::test]
async fn test_pantry_endpoints() -> Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/pantry/2",
        Some(json!({"ingredient_name": "Rice", "amount": 300, "action": "add"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["amount"], 300);

    let (status, body) = send(
        &app,
        Method::POST,
        "/pantry/2",
        Some(json!({"ingredient_name": "rice", "amount": 100, "action": "remove"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["amount"], 200);

    let (status, body) = send(&app, Method::GET, "/pantry/2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"ingredient_id": body[0]["ingredient_id"], "ingredient_name": "rice", "amount": 200}]));

    let (status, _) = send(&app, Method::DELETE, "/pantry/2?ingredient_name=rice", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, "/pantry/2?ingredient_name=rice", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/pantry/77", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_matchmaking_and_cook_endpoints() -> Result<()> {
    let app = seeded_app().await?;

    let (status, body) = send(&app, Method::GET, "/matchmaking/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["recipe_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    let (status, body) = send(&app, Method::POST, "/cook/1/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipe_name"], "classic pancakes");
    let flour = body["consumed"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["ingredient_name"] == "flour")
        .unwrap()
        .clone();
    assert_eq!(flour["previous"], 500);
    assert_eq!(flour["remaining"], 440);

    let (status, body) = send(&app, Method::POST, "/cook/1/3", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_STOCK");
    assert_eq!(body["error"]["details"]["missing"].as_array().unwrap().len(), 6);

    let (status, body) = send(&app, Method::POST, "/cook/1/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    let (status, _) = send(&app, Method::POST, "/cook/99/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/matchmaking/99", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
