//! REST API types.

use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: "halftone".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: vec!["GET /api/{tokenId}".to_string()],
        }
    }
}
