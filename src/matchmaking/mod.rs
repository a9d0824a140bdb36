// ABOUTME: Matchmaking engine deciding which recipes a pantry can cover and cooking them atomically
// ABOUTME: Re-exports the inventory matcher and the cook transaction executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

//! # Matchmaking
//!
//! Two components built on the repository traits:
//!
//! - [`Matchmaker`] lists the recipes a user can cook right now. It only
//!   reads, so concurrent calls never interfere.
//! - [`CookExecutor`] prepares a recipe: it re-validates the pantry inside a
//!   write-locked transaction and deducts every requirement, or changes
//!   nothing and reports the shortfalls.
//!
//! The decision logic lives in pure functions ([`match_recipes`] and
//! [`plan_deductions`]) so it can be tested without a database.

mod executor;
mod matcher;

pub use executor::{plan_deductions, CookExecutor, PlannedDeduction};
pub use matcher::{match_recipes, DataIntegrityWarning, MatchReport, Matchmaker};
