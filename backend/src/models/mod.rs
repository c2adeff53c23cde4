//! Domain models for the Halftone ETH collection.
//!
//! Token metadata follows the OpenSea metadata standard so marketplaces can
//! render the collection directly from `tokenURI`.

use serde::{Deserialize, Serialize};

use crate::config::{COLLECTION_DESCRIPTION, COLLECTION_NAME};

/// Metadata descriptor for a single token.
///
/// ```json
/// {
///   "name": "Halftone ETH #5",
///   "description": "Halftone ETH is a multi-variant halftone version of Ethereum icon",
///   "image": "https://.../halftone-eth/5.svg"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Display name, `"Halftone ETH #{id}"`
    pub name: String,
    /// Collection-wide description
    pub description: String,
    /// Absolute URL of the token artwork
    pub image: String,
}

impl TokenMetadata {
    /// Build the descriptor for `token_id`.
    ///
    /// The id is taken verbatim: no numeric validation happens, so any path
    /// segment the router hands over is echoed back.
    pub fn for_token(token_id: &str, image_base_url: &str) -> Self {
        Self {
            name: format!("{} #{}", COLLECTION_NAME, token_id),
            description: COLLECTION_DESCRIPTION.to_string(),
            image: format!("{}{}.svg", image_base_url, token_id),
        }
    }
}
