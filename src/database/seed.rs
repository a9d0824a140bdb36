// ABOUTME: Idempotent seeding of the standard users, ingredient catalog, recipes, and admin pantry
// ABOUTME: Runs on first startup and from the seed-catalog binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::transactions::SqliteTransactionGuard;
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::RecipeDraft;

/// Accounts every installation starts with; the first one is the admin
pub const STANDARD_USERS: [&str; 4] = ["admin", "auren_1337", "memelord_tommy", "nerd_tubbe"];

/// Standard ingredient catalog
pub const STANDARD_INGREDIENTS: &[&str] = &[
    // Dairy & eggs
    "butter", "eggs", "milk", "cheddar cheese", "parmesan cheese",
    "mozzarella", "heavy cream", "yogurt", "sour cream", "cream cheese",
    // Vegetables
    "onion", "garlic", "tomato", "potato", "carrot",
    "bell pepper", "broccoli", "spinach", "cucumber", "lettuce",
    "mushroom", "zucchini", "ginger", "celery", "green onion",
    "corn", "avocado", "cauliflower", "sweet potato", "chili pepper",
    "peas", "green beans", "asparagus", "cabbage", "eggplant",
    "kale", "leek", "brussels sprouts", "beets", "radish",
    // Fruit
    "lemon", "lime", "apple", "banana", "orange",
    "strawberry", "blueberry", "pineapple", "mango", "grapes",
    "peach", "pear", "watermelon", "cherry", "raspberry",
    // Meat, fish, and tofu
    "chicken breast", "ground beef", "bacon", "sausage", "salmon",
    "tuna", "shrimp", "pork chop", "steak", "tofu",
    "ham", "turkey", "chicken thighs", "ground pork", "pepperoni",
    // Grains
    "rice", "spaghetti", "pasta", "flour", "bread",
    "oats", "breadcrumbs", "tortilla", "noodles", "quinoa",
    // Condiments
    "olive oil", "vegetable oil", "soy sauce", "white vinegar", "balsamic vinegar",
    "sugar", "brown sugar", "honey", "mustard", "ketchup",
    "mayonnaise", "tomato paste", "tomato sauce", "chicken stock", "beef stock",
    "worcestershire sauce", "hot sauce", "maple syrup", "sesame oil", "bbq sauce",
    // Spices
    "basil", "oregano", "cumin", "paprika", "cinnamon",
    "thyme", "rosemary", "parsley", "coriander", "turmeric",
    "chili powder", "garlic powder", "onion powder", "nutmeg", "bay leaf",
    "cayenne pepper", "cloves", "vanilla extract", "cocoa powder", "chocolate chips",
    // Baking and nuts
    "baking powder", "baking soda", "yeast", "cornstarch", "almonds",
    "walnuts", "peanuts", "peanut butter", "cashews", "raisins",
];

/// Starting stock of the admin pantry
const ADMIN_PANTRY: &[(&str, i64)] = &[
    ("flour", 500),
    ("milk", 1000),
    ("eggs", 10),
    ("butter", 250),
    ("sugar", 500),
    ("baking powder", 50),
    ("spaghetti", 500),
    ("garlic", 5),
    ("olive oil", 200),
    ("parsley", 20),
    ("parmesan cheese", 150),
];

struct SeedRecipe {
    name: &'static str,
    description: &'static str,
    creator: &'static str,
    time_needed: u32,
    ingredients: &'static [(&'static str, i64)],
    steps: &'static [&'static str],
}

const STANDARD_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        name: "Classic Pancakes",
        description: "Fluffy sunday breakfast pancakes. (Single Portion)",
        creator: "auren_1337",
        time_needed: 20,
        ingredients: &[
            ("flour", 60),
            ("milk", 100),
            ("eggs", 1),
            ("butter", 1),
            ("sugar", 1),
            ("baking powder", 1),
        ],
        steps: &[
            "Mix flour, sugar and baking powder in a large bowl.",
            "Whisk milk and eggs in a separate jug.",
            "Combine wet and dry ingredients.",
            "Melt butter in pan and fry batter until golden.",
        ],
    },
    SeedRecipe {
        name: "Spaghetti Aglio e Olio",
        description: "Simple, garlic-infused pasta. (Single Portion)",
        creator: "memelord_tommy",
        time_needed: 15,
        ingredients: &[
            ("spaghetti", 125),
            ("garlic", 1),
            ("olive oil", 1),
            ("parsley", 1),
            ("parmesan cheese", 1),
        ],
        steps: &[
            "Boil spaghetti in salted water until al dente.",
            "Slice garlic thinly and fry in olive oil gently.",
            "Toss pasta into the garlic oil.",
            "Add parsley and grated cheese before serving.",
        ],
    },
    SeedRecipe {
        name: "Chicken Stir-Fry",
        description: "Healthy and quick weeknight dinner. (Single Portion)",
        creator: "nerd_tubbe",
        time_needed: 25,
        ingredients: &[
            ("chicken breast", 1),
            ("rice", 1),
            ("soy sauce", 1),
            ("broccoli", 1),
            ("onion", 1),
            ("ginger", 1),
        ],
        steps: &[
            "Cook rice according to package instructions.",
            "Cut chicken into strips and fry in a hot wok.",
            "Add chopped vegetables and stir-fry for 5 minutes.",
            "Add soy sauce and ginger, serve over rice.",
        ],
    },
    SeedRecipe {
        name: "Caprese Salad",
        description: "Fresh Italian summer salad. (Single Portion)",
        creator: "admin",
        time_needed: 10,
        ingredients: &[
            ("tomato", 2),
            ("mozzarella", 125),
            ("basil", 1),
            ("olive oil", 1),
            ("balsamic vinegar", 1),
        ],
        steps: &[
            "Slice tomatoes and mozzarella cheese.",
            "Arrange slices alternately on a plate.",
            "Sprinkle fresh basil leaves on top.",
            "Drizzle with olive oil and balsamic vinegar.",
        ],
    },
];

/// Counts of rows created by one seeding run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Users inserted
    pub users_created: u64,
    /// Ingredients inserted
    pub items_created: u64,
    /// Recipes inserted
    pub recipes_created: u64,
    /// Admin pantry rows written
    pub pantry_entries: u64,
}

/// True when the database has no users yet
///
/// # Errors
///
/// Returns an error if database operation fails
pub async fn is_empty(db: &Database) -> AppResult<bool> {
    Ok(db.users().count().await? == 0)
}

/// Seed users, ingredients, recipes, and the admin pantry
///
/// Safe to run repeatedly: existing users, ingredients, and recipes (by
/// name) are left alone and the admin pantry is reset to its starting stock.
///
/// # Errors
///
/// Returns an error if any insert fails
pub async fn seed_catalog(db: &Database) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    let tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin seed transaction: {e}")))?;
    let mut guard = SqliteTransactionGuard::new(tx);

    let member_since = Utc::now().to_rfc3339();
    for username in STANDARD_USERS {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (username, active, member_since) VALUES ($1, 1, $2)",
        )
        .bind(username)
        .bind(&member_since)
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed user '{username}': {e}")))?;
        report.users_created += result.rows_affected();
    }

    for name in STANDARD_INGREDIENTS {
        let result = sqlx::query("INSERT OR IGNORE INTO items (ingredient_name) VALUES ($1)")
            .bind(*name)
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed item '{name}': {e}")))?;
        report.items_created += result.rows_affected();
    }
    guard.commit().await?;
    AppLogger::log_sql(
        "INSERT OR IGNORE INTO users/items",
        &format!(
            "users={} items={}",
            report.users_created, report.items_created
        ),
    );

    for recipe in STANDARD_RECIPES {
        if db.recipes().find_id_by_name(recipe.name).await?.is_some() {
            continue;
        }
        let Some(creator) = db.users().find_by_username(recipe.creator).await? else {
            warn!(recipe = recipe.name, creator = recipe.creator, "Seed creator missing, skipping recipe");
            continue;
        };

        let draft = RecipeDraft {
            recipe_name: recipe.name.to_owned(),
            description: Some(recipe.description.to_owned()),
            recipe_creator: Some(creator.user_id),
            time_needed: recipe.time_needed,
            recipe_ingredients: recipe
                .ingredients
                .iter()
                .map(|(name, quantity)| ((*name).to_owned(), *quantity))
                .collect::<BTreeMap<_, _>>(),
            instructions: recipe.steps.iter().map(|step| (*step).to_owned()).collect(),
        };
        db.recipes().create(draft).await?;
        report.recipes_created += 1;
    }

    report.pantry_entries = seed_admin_pantry(db).await?;

    info!(
        users = report.users_created,
        items = report.items_created,
        recipes = report.recipes_created,
        pantry_entries = report.pantry_entries,
        "Catalog seeded"
    );
    Ok(report)
}

async fn seed_admin_pantry(db: &Database) -> AppResult<u64> {
    let Some(admin) = db.users().find_by_username(STANDARD_USERS[0]).await? else {
        warn!("Admin account missing, pantry not seeded");
        return Ok(0);
    };

    let tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin seed transaction: {e}")))?;
    let mut guard = SqliteTransactionGuard::new(tx);

    let mut written = 0;
    for (name, amount) in ADMIN_PANTRY {
        let result = sqlx::query(
            r"
            INSERT INTO pantry (user_id, ingredient_id, amount)
            SELECT $1, ingredient_id, $3 FROM items WHERE ingredient_name = $2
            ON CONFLICT (user_id, ingredient_id) DO UPDATE SET amount = excluded.amount
            ",
        )
        .bind(admin.user_id.get())
        .bind(*name)
        .bind(*amount)
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed pantry item '{name}': {e}")))?;

        if result.rows_affected() == 0 {
            warn!(ingredient = name, "Seed ingredient missing, pantry entry skipped");
        }
        written += result.rows_affected();
    }
    guard.commit().await?;
    AppLogger::log_sql(
        "INSERT INTO pantry ... ON CONFLICT DO UPDATE",
        &format!("user_id={} entries={written}", admin.user_id),
    );
    Ok(written)
}
