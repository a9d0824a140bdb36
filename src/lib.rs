// ABOUTME: Main library entry point for the CloudCookbook backend
// ABOUTME: Provides recipe catalog, pantry management, matchmaking and atomic cooking over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

#![deny(unsafe_code)]

//! # CloudCookbook
//!
//! Backend for a shared recipe catalog and per-user pantries.
//!
//! ## Features
//!
//! - **Catalog**: ingredients and recipes with ordered steps
//! - **Pantries**: per-user on-hand quantities with add/remove updates
//! - **Matchmaking**: every recipe a pantry can cover right now
//! - **Cooking**: all-or-nothing deduction of a recipe's requirements
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` managers, transaction guards and retry helpers
//! - **Matchmaking**: matcher and cook executor behind repository traits
//! - **Routes**: thin axum handlers delegating to the layers above
//! - **Config / Logging**: environment configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cloudcookbook::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("CloudCookbook configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Limits, defaults and log targets
pub mod constants;

/// `SQLite` persistence layer
pub mod database;

/// Error types and HTTP error mapping
pub mod errors;

/// Logging setup and structured log helpers
pub mod logging;

/// Inventory matcher and cook transaction executor
pub mod matchmaking;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;
