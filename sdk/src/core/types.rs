use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Validated attributes of the token being launched.
///
/// Built from a [`crate::form::TokenForm`] once every field passes
/// validation. `metadata_url` stays empty until the metadata document has
/// been uploaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAttributes {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    /// Image URL
    pub image: Option<String>,
    pub num_decimals: u8,
    /// Initial supply in whole tokens
    pub num_tokens: f64,
    pub metadata_url: Option<String>,
}

impl TokenAttributes {
    /// Off-chain document handed to the storage uploader
    pub fn metadata_payload(&self) -> MetadataPayload {
        MetadataPayload {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }

    /// Attach the URI returned by the uploader
    pub fn with_metadata_url(mut self, uri: impl Into<String>) -> Self {
        self.metadata_url = Some(uri.into());
        self
    }
}

/// JSON metadata document stored off-chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataPayload {
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Result of a metadata upload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedMetadata {
    pub uri: String,
}

/// Addresses involved in one launch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchAccounts {
    /// Fee payer, mint authority, freeze authority and supply owner
    pub wallet: Pubkey,
    pub mint: Pubkey,
    pub associated_token_account: Pubkey,
    pub metadata: Pubkey,
    /// Lamports funding the mint account
    pub mint_rent: u64,
}

/// Success output of a launch
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchReceipt {
    #[serde(with = "display_fromstr")]
    pub mint: Pubkey,
    #[serde(with = "display_fromstr")]
    pub associated_token_account: Pubkey,
    #[serde(with = "display_fromstr")]
    pub metadata_account: Pubkey,
    #[serde(with = "display_fromstr")]
    pub signature: Signature,
    /// Initial supply in base units
    pub raw_supply: u64,
    pub attributes: TokenAttributes,
}

mod display_fromstr {
    use serde::Serializer;
    use std::fmt::Display;

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}
