//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Toast Types** - Notification messages
//! - **Error Types** - Frontend error handling

use std::fmt;

// =============================================================================
// Toast Types
// =============================================================================

/// Toast flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Completed action
    Success,
    /// Failed action
    Error,
}

impl ToastKind {
    /// Title shown in bold.
    pub fn title(&self) -> &'static str {
        match self {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
        }
    }

    /// Background colour.
    pub fn background_color(&self) -> &'static str {
        match self {
            ToastKind::Success => "#5cb85c",
            ToastKind::Error => "#d9534f",
        }
    }

    /// Icon path.
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "./check.svg",
            ToastKind::Error => "./error.svg",
        }
    }
}

/// A single notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastMessage {
    /// Creation timestamp (ms); unique within a queue
    pub id: u64,
    pub title: String,
    pub description: String,
    pub background_color: String,
    pub icon: String,
}

impl ToastMessage {
    pub fn new(id: u64, kind: ToastKind, description: impl Into<String>) -> Self {
        Self {
            id,
            title: kind.title().to_string(),
            description: description.into(),
            background_color: kind.background_color().to_string(),
            icon: kind.icon().to_string(),
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all wallet and contract operations.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// No injected wallet, or the user refused access.
    Wallet(String),
    /// Wallet is on the wrong chain.
    Network(String),
    /// Provider request failed.
    Rpc(String),
    /// ABI encoding/decoding failed.
    Contract(String),
    /// Transaction was rejected or reverted.
    Transaction(String),
    /// Build-time configuration is unusable.
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Wallet(msg) => write!(f, "{}", msg),
            AppError::Network(msg) => write!(f, "{}", msg),
            AppError::Rpc(msg) => write!(f, "RPC error: {}", msg),
            AppError::Contract(msg) => write!(f, "Contract error: {}", msg),
            AppError::Transaction(msg) => write!(f, "{}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_kind_styling() {
        let ok = ToastMessage::new(1, ToastKind::Success, "done");
        assert_eq!(ok.title, "Success");
        assert_eq!(ok.background_color, "#5cb85c");
        assert_eq!(ok.icon, "./check.svg");

        let err = ToastMessage::new(2, ToastKind::Error, "nope");
        assert_eq!(err.title, "Error");
        assert_eq!(err.background_color, "#d9534f");
        assert_eq!(err.icon, "./error.svg");
    }

    #[test]
    fn test_wallet_errors_display_verbatim() {
        let err = AppError::Network("Change the network to Rinkeby".into());
        assert_eq!(err.to_string(), "Change the network to Rinkeby");
    }
}
