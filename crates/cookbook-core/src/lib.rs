// ABOUTME: Core types and constants for the CloudCookbook recipe and pantry backend
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

#![deny(unsafe_code)]

//! # Cookbook Core
//!
//! Foundation crate providing shared types for the `CloudCookbook` backend.
//! It holds no I/O: the main crate owns storage, HTTP, and the cook executor.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `CookError`
//! - **models**: Users, ingredients, recipes, pantries, and cook results
//! - **constants**: Field limits, configuration defaults, and log targets

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (User, Ingredient, Recipe, Pantry, `CookResult`)
pub mod models;
