// ABOUTME: Access log middleware recording method, path, status and latency of every request
// ABOUTME: Emits one event per request on the api_access tracing target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::logging::AppLogger;

/// Log `METHOD path - status - duration` once the response is ready
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    AppLogger::log_api_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        duration_ms,
    );
    response
}
