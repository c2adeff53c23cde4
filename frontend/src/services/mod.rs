//! Wallet and contract services.
//!
//! # Services
//!
//! - [`wallet`] - Injected EIP-1193 wallet (MetaMask, etc.)
//! - [`contract`] - HalftoneEth calls behind read/write capabilities

pub mod wallet;
pub mod contract;

pub use wallet::*;
pub use contract::*;
