// ABOUTME: Seeding utility loading the standard users, ingredients, recipes and admin pantry
// ABOUTME: Idempotent; safe to run against a database that is already populated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use anyhow::Result;
use clap::Parser;
use cloudcookbook::{
    config::environment::DatabaseConfig,
    database::{seed, Database},
    logging,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "seed-catalog")]
#[command(about = "Load the standard CloudCookbook catalog into a database")]
struct Args {
    /// Database URL, defaults to `DATABASE_URL` or the local file database
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let mut config = DatabaseConfig::default();
    if let Some(url) = args.database_url {
        config.url = url;
    }

    info!("Seeding catalog into {}", config.url);
    let database = Database::connect(&config).await?;
    let report = seed::seed_catalog(&database).await?;

    println!(
        "Seeded {} users, {} ingredients, {} recipes, {} admin pantry entries",
        report.users_created, report.items_created, report.recipes_created, report.pantry_entries
    );
    Ok(())
}
