//! # Halftone - metadata API and deployment for the Halftone ETH collection
//!
//! The minting page lives in the `halftone-frontend` crate; this crate holds
//! everything that runs outside the browser.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  tokenURI   ┌──────────────────┐
//! │  Contract   │────────────▶│ GET /api/{id}    │──▶ { name, description, image }
//! │ HalftoneEth │             │ (metadata server)│
//! └─────────────┘             └──────────────────┘
//!        ▲
//!        │ eth_sendTransaction(bytecode ++ constructor args)
//! ┌─────────────┐
//! │ halftone    │
//! │   deploy    │
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Collection constants and environment settings
//! - [`models`] - Token metadata descriptor
//! - [`api`] - HTTP API server
//! - [`deploy`] - Contract deployment over JSON-RPC

// Core modules
pub mod error;
pub mod config;
pub mod models;

// HTTP API
pub mod api;

// Deployment
pub mod deploy;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ArtifactError, DeployError, RpcError, ServerError};

pub use config::MetadataConfig;

pub use models::TokenMetadata;

pub use deploy::{deploy_contract, DeployAccount, DeploySettings};

/// Re-export server module for CLI
pub mod server {
    pub use crate::api::server::*;
}
