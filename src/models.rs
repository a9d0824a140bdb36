// ABOUTME: Domain model re-exports for the CloudCookbook server
// ABOUTME: Identifiers, users, ingredients, recipes and pantry records from the core crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

pub use cookbook_core::models::*;
