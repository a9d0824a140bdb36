// ABOUTME: Error handling re-exports for the CloudCookbook server
// ABOUTME: AppError, ErrorCode and CookError live in the core crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

pub use cookbook_core::errors::{
    AppError, AppResult, CookError, ErrorCode, ErrorContext, ErrorResponse,
};
