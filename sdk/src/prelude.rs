//! Prelude module for common imports
//!
//! Everything address- and signing-related comes from solana-sdk.

pub use solana_sdk::{pubkey::Pubkey, signature::Signature};
