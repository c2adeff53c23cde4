//! Backend configuration.
//!
//! Constants mirror the collection as deployed. Anything that changes per
//! environment is read from the process environment (after `.env` has been
//! loaded by the binary) and can be overridden with CLI flags.

use std::env;

/// Address of the whitelist contract the collection checks presale mints against.
pub const WHITELIST_CONTRACT_ADDRESS: &str = "0x1552984Dbc4b3fc0e19D3317E8EC9501E4836A86";

/// Base URI the contract uses for `tokenURI`; the token id is appended.
pub const METADATA_URL: &str = "https://halftone-ethereum.vercel.app/api/";

/// Where the token artwork lives. `{tokenId}.svg` is appended.
pub const IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/gilangadam/nft-collection/main/my-app/public/halftone-eth/";

/// Collection display name, used as `"{COLLECTION_NAME} #{id}"`.
pub const COLLECTION_NAME: &str = "Halftone ETH";

/// Description shared by every token.
pub const COLLECTION_DESCRIPTION: &str =
    "Halftone ETH is a multi-variant halftone version of Ethereum icon";

/// Default hardhat artifact location for the compiled contract.
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/HalftoneEth.sol/HalftoneEth.json";

/// Default HTTP port for `halftone serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable overriding [`IMAGE_BASE_URL`].
pub const IMAGE_BASE_URL_ENV: &str = "HALFTONE_IMAGE_BASE_URL";

/// Metadata endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    /// Prefix for token images
    pub image_base_url: String,
}

impl MetadataConfig {
    /// Read from environment, falling back to the built-in constants.
    pub fn from_env() -> Self {
        Self {
            image_base_url: env::var(IMAGE_BASE_URL_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| IMAGE_BASE_URL.to_string()),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            image_base_url: IMAGE_BASE_URL.to_string(),
        }
    }
}
