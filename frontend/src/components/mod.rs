//! UI Components for the Halftone ETH minting page.
//!
//! # Layout Components
//! - [`Hero`] - Title, description and minted counter
//! - [`Footer`] - Twitter credit
//!
//! # Feature Components
//! - [`MintPanel`] - The single call-to-action button
//! - [`CountdownTimer`] - Time left in the presale
//! - [`ToastContainer`] - Notifications
//! - [`ProgressBar`] - Pending transaction indicator

mod hero;
mod mint_panel;
mod countdown;
mod toast;
mod progress;
mod footer;

pub use hero::*;
pub use mint_panel::*;
pub use countdown::*;
pub use toast::*;
pub use progress::*;
pub use footer::*;
