// ABOUTME: HTTP middleware for the CloudCookbook API
// ABOUTME: CORS configuration and per-request access logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

/// CORS layer built from configuration
pub mod cors;

/// Access log middleware
pub mod request_logging;

pub use cors::setup_cors;
pub use request_logging::log_requests;
