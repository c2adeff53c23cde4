//! Application configuration.
//!
//! Centralized configuration for the Halftone ETH minting page.
//! The contract address can be injected at build time with
//! `HALFTONE_CONTRACT_ADDRESS=0x... trunk build`.

use alloy_primitives::Address;

use crate::types::{AppError, AppResult};

/// Deployed HalftoneEth contract address.
pub const NFT_CONTRACT_ADDRESS: &str = match option_env!("HALFTONE_CONTRACT_ADDRESS") {
    Some(address) => address,
    None => "0x0000000000000000000000000000000000000000",
};

/// Chain id the wallet must be connected to (Rinkeby).
pub const REQUIRED_CHAIN_ID: u64 = 4;

/// Human name of [`REQUIRED_CHAIN_ID`], shown in the wrong-network toast.
pub const NETWORK_NAME: &str = "Rinkeby";

/// Price of one token in wei (0.01 ETH), for both presale and public mint.
pub const MINT_PRICE_WEI: u128 = 10_000_000_000_000_000;

/// Maximum supply shown next to the minted counter.
pub const MAX_SUPPLY: u64 = 20;

/// Toast auto-dismiss interval in milliseconds.
pub const TOAST_DISMISS_MS: u64 = 3000;

/// Presale status poll interval in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 5000;

/// Transaction receipt poll interval in milliseconds.
pub const RECEIPT_POLL_MS: u32 = 1000;

/// Expected confirmation time, drives the progress bar animation.
pub const CONFIRMATION_ESTIMATE_MS: u64 = 15_000;

/// Where users add themselves to the whitelist.
pub const WHITELIST_URL: &str = "https://halftone-ethereum-whitelist.vercel.app/";

/// Page heading.
pub const COLLECTION_TITLE: &str = "Halftone-Ethereum";

/// Page description under the heading.
pub const COLLECTION_DESCRIPTION: &str =
    "This is a NFT collection of multi-variant halftone version of Ethereum icon.";

/// Collection preview shown next to the mint button.
pub const PREVIEW_IMAGE: &str = "./halftone-eth/00.svg";

/// Footer credit.
pub const TWITTER_HANDLE: &str = "async_dime";

/// Parsed [`NFT_CONTRACT_ADDRESS`].
pub fn contract_address() -> AppResult<Address> {
    NFT_CONTRACT_ADDRESS
        .parse()
        .map_err(|_| AppError::Config(format!("invalid contract address {}", NFT_CONTRACT_ADDRESS)))
}

/// Link to the credited Twitter account.
pub fn twitter_link() -> String {
    format!("https://twitter.com/{}", TWITTER_HANDLE)
}
