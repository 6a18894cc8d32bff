use crate::core::{metadata_program_id, seeds, token_program_id};
use crate::prelude::*;

/// Derives the metadata and associated token accounts of a launch
#[derive(Clone, Debug)]
pub struct PdaBuilder {
    pub metadata_program_id: Pubkey,
    pub token_program_id: Pubkey,
}

impl PdaBuilder {
    pub fn new() -> Self {
        Self {
            metadata_program_id: metadata_program_id(),
            token_program_id: token_program_id(),
        }
    }

    /// Metaplex metadata account: `["metadata", metadata_program, mint]`
    pub fn metadata(&self, mint: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                seeds::METADATA,
                self.metadata_program_id.as_ref(),
                mint.as_ref(),
            ],
            &self.metadata_program_id,
        )
    }

    /// Associated token account holding `owner`'s balance of `mint`
    pub fn associated_token_account(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        spl_associated_token_account::get_associated_token_address_with_program_id(
            owner,
            mint,
            &self.token_program_id,
        )
    }
}

impl Default for PdaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function for one-off metadata derivations
pub fn find_metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    PdaBuilder::new().metadata(mint)
}
