//! HTTP Server for the Halftone metadata API.
//!
//! Serves the per-token JSON descriptors the contract's `tokenURI` points at.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | GET    | `/api/{tokenId}`  | Token metadata descriptor            |

use axum::{
    extract::{Path, State},
    http::{header, Method},
    response::Json,
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::types::HealthResponse;
use crate::config::MetadataConfig;
use crate::error::ServerResult;
use crate::models::TokenMetadata;

/// Build the application router.
pub fn router(config: MetadataConfig) -> Router {
    // Marketplaces and the minting page fetch metadata cross-origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/{token_id}", get(token_metadata))
        .with_state(Arc::new(config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_server(port: u16, config: MetadataConfig) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🚀 Halftone metadata server running on http://localhost:{}", port);
    tracing::info!("   GET /api/{{tokenId}} - Token metadata");
    tracing::info!("   GET /health         - Health check");
    tracing::info!("   Images served from {}", config.image_base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(config)).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Token metadata endpoint. Any id is accepted and echoed.
async fn token_metadata(
    State(config): State<Arc<MetadataConfig>>,
    Path(token_id): Path<String>,
) -> Json<TokenMetadata> {
    tracing::debug!(token_id = %token_id, "metadata requested");
    Json(TokenMetadata::for_token(&token_id, &config.image_base_url))
}
