// ABOUTME: HTTP server assembly and lifecycle for CloudCookbook
// ABOUTME: Merges domain routers, applies middleware layers and serves until a shutdown signal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CloudCookbook Contributors

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::middleware::{log_requests, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{
    HealthRoutes, ItemRoutes, MatchmakingRoutes, PantryRoutes, RecipeRoutes, UserRoutes,
};

/// Build the complete application router
///
/// Layers run outermost first: CORS, the `tower-http` trace span, then the
/// access log.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(ItemRoutes::routes(Arc::clone(&resources)))
        .merge(UserRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(PantryRoutes::routes(Arc::clone(&resources)))
        .merge(MatchmakingRoutes::routes(resources))
        .layer(middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the API until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address is invalid, binding fails, or the server
/// stops abnormally
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let address: SocketAddr = format!("{}:{}", resources.config.host, resources.config.http_port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                resources.config.host, resources.config.http_port
            )
        })?;

    let app = build_router(resources);
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("CloudCookbook listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
