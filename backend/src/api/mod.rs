//! HTTP API module.
//!
//! This module provides the metadata server and its API types.

pub mod server;
pub mod types;

pub use server::{router, start_server};
pub use types::*;
