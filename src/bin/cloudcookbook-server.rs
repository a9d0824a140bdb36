// ABOUTME: Server binary for the CloudCookbook HTTP API
// ABOUTME: Loads configuration, opens and optionally seeds the database, then serves requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! # CloudCookbook Server Binary
//!
//! Starts the recipe, pantry and matchmaking API.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cloudcookbook::{
    config::environment::ServerConfig,
    database::{seed, Database},
    logging,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

/// Command-line arguments for the API server
#[derive(Parser)]
#[command(name = "cloudcookbook-server")]
#[command(about = "CloudCookbook - recipe catalog, pantries and matchmaking API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Skip seeding an empty database
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }
    if args.no_seed {
        config.seed_on_startup = false;
    }
    config.validate()?;

    logging::init_from_env()?;
    info!("Starting CloudCookbook");
    info!("{}", config.summary());

    let database = Database::connect(&config.database).await?;

    if config.seed_on_startup && seed::is_empty(&database).await? {
        let report = seed::seed_catalog(&database).await?;
        info!(
            users = report.users_created,
            items = report.items_created,
            recipes = report.recipes_created,
            pantry_entries = report.pantry_entries,
            "Seeded empty database"
        );
    }

    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
