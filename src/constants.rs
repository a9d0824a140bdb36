// ABOUTME: Application constants re-exported from the core crate
// ABOUTME: Field limits, configuration defaults, service names and log targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

pub use cookbook_core::constants::{defaults, limits, log_targets, service_names};
