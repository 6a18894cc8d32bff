use crate::prelude::*;

/// Largest decimals value accepted for a new mint
pub const MAX_DECIMALS: u8 = 9;

/// Royalty applied to launched tokens, fungible tokens carry none
pub const SELLER_FEE_BASIS_POINTS: u16 = 0;

/// Metaplex token metadata program
pub fn metadata_program_id() -> Pubkey {
    mpl_token_metadata::ID
}

/// SPL token program that owns launched mints
pub fn token_program_id() -> Pubkey {
    spl_token::id()
}

/// Seeds for derived addresses
pub mod seeds {
    pub const METADATA: &[u8] = b"metadata";
}

/// Public RPC endpoints per cluster
pub mod endpoints {
    pub const MAINNET: &str = "https://api.mainnet-beta.solana.com";
    pub const DEVNET: &str = "https://api.devnet.solana.com";
    pub const TESTNET: &str = "https://api.testnet.solana.com";
    pub const LOCALNET: &str = "http://localhost:8899";
}

/// Metaplex field limits, in bytes
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;
