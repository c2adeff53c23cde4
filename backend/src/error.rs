//! Error types for the Halftone backend.
//!
//! - [`RpcError`] - JSON-RPC transport and node errors
//! - [`ArtifactError`] - Compiled contract artifact loading
//! - [`DeployError`] - Top-level deployment errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// JSON-RPC Errors
// =============================================================================

/// Errors talking to an Ethereum node over JSON-RPC.
#[derive(Debug, Error)]
pub enum RpcError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a JSON-RPC error object.
    #[error("Node error {code}: {message}")]
    Node { code: i64, message: String },

    /// The response could not be interpreted.
    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Artifact Errors
// =============================================================================

/// Errors loading the compiled contract.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Failed to read the artifact file.
    #[error("Failed to read artifact: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact is not valid JSON.
    #[error("Artifact JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Artifact has no usable creation bytecode.
    #[error("Artifact has no bytecode")]
    MissingBytecode,

    /// Bytecode is not valid hex.
    #[error("Invalid bytecode hex: {0}")]
    InvalidBytecode(#[from] hex::FromHexError),
}

// =============================================================================
// Deployment Errors (top-level)
// =============================================================================

/// Top-level deployment errors.
///
/// This is the error type returned by [`crate::deploy::deploy_contract`].
#[derive(Debug, Error)]
pub enum DeployError {
    /// JSON-RPC error.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Artifact error.
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Required setting missing from flags and environment.
    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),

    /// An address setting could not be parsed.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    /// `PRIVATE_KEY` is not a 32-byte hex secp256k1 key.
    #[error("Invalid private key")]
    InvalidKey,

    /// Local transaction signing failed.
    #[error("Signing failed: {0}")]
    Signing(#[from] alloy_signer::Error),

    /// The deployment transaction was mined but reverted.
    #[error("Deployment transaction {0} reverted")]
    Reverted(String),

    /// No receipt arrived in time.
    #[error("Timed out waiting for receipt of {0}")]
    Timeout(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind or serve.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for JSON-RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Result type for deployment.
pub type DeployResult<T> = Result<T, DeployError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let artifact_err = ArtifactError::MissingBytecode;
        let deploy_err: DeployError = artifact_err.into();
        assert!(deploy_err.to_string().contains("no bytecode"));

        let rpc_err = RpcError::Node {
            code: -32000,
            message: "insufficient funds".into(),
        };
        let deploy_err: DeployError = rpc_err.into();
        assert!(deploy_err.to_string().contains("insufficient funds"));
    }

    #[test]
    fn test_reverted_format() {
        let err = DeployError::Reverted("0xabc".into());
        assert_eq!(err.to_string(), "Deployment transaction 0xabc reverted");
    }
}
