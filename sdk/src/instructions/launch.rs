use mpl_token_metadata::{
    instructions::{CreateMetadataAccountV3, CreateMetadataAccountV3InstructionArgs},
    types::DataV2,
};
use solana_sdk::{
    instruction::Instruction, program_pack::Pack, system_instruction, system_program, sysvar,
};
use spl_token::{instruction::TokenInstruction, state::Mint};

use crate::{
    core::{
        metadata_program_id, token_program_id, LaunchAccounts, SdkError, SdkResult,
        TokenAttributes, MAX_URI_LENGTH,
        SELLER_FEE_BASIS_POINTS,
    },
    prelude::*,
};

/// The five instructions of a launch transaction, in execution order.
///
/// Each step relies on accounts created by the steps before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LaunchStep {
    CreateMintAccount,
    InitializeMint,
    CreateAssociatedTokenAccount,
    MintTo,
    CreateMetadata,
}

impl LaunchStep {
    pub const ORDER: [LaunchStep; 5] = [
        LaunchStep::CreateMintAccount,
        LaunchStep::InitializeMint,
        LaunchStep::CreateAssociatedTokenAccount,
        LaunchStep::MintTo,
        LaunchStep::CreateMetadata,
    ];

    /// Identify which launch step an instruction performs
    pub fn of(ix: &Instruction) -> Option<LaunchStep> {
        if ix.program_id == system_program::id() {
            // SystemInstruction::CreateAccount has index 0
            return (ix.data.get(..4) == Some(&[0u8, 0, 0, 0][..]))
                .then_some(LaunchStep::CreateMintAccount);
        }
        if ix.program_id == spl_associated_token_account::id() {
            return Some(LaunchStep::CreateAssociatedTokenAccount);
        }
        if ix.program_id == metadata_program_id() {
            return Some(LaunchStep::CreateMetadata);
        }
        if ix.program_id == token_program_id() {
            return match TokenInstruction::unpack(&ix.data).ok()? {
                TokenInstruction::InitializeMint { .. } => Some(LaunchStep::InitializeMint),
                TokenInstruction::MintTo { .. } => Some(LaunchStep::MintTo),
                _ => None,
            };
        }
        None
    }
}

/// Scale a whole-token supply to base units: `num_tokens * 10^decimals`.
///
/// Fractional supplies round to the nearest base unit.
pub fn raw_supply(num_tokens: f64, decimals: u8) -> SdkResult<u64> {
    if !num_tokens.is_finite() || num_tokens < 0.0 {
        return Err(SdkError::InvalidParameters(format!(
            "initial supply must be a non-negative number, got {}",
            num_tokens
        )));
    }
    let scale = 10u64
        .checked_pow(u32::from(decimals))
        .ok_or(SdkError::MathOverflow)?;

    // 2^64, the first f64 above u64::MAX
    const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

    if num_tokens.fract() == 0.0 {
        if num_tokens >= U64_LIMIT {
            return Err(SdkError::MathOverflow);
        }
        return (num_tokens as u64)
            .checked_mul(scale)
            .ok_or(SdkError::MathOverflow);
    }

    let scaled = (num_tokens * scale as f64).round();
    if scaled >= U64_LIMIT {
        return Err(SdkError::MathOverflow);
    }
    Ok(scaled as u64)
}

/// Builds the instructions that create a mint, fund the creator and attach
/// Metaplex metadata
pub struct LaunchInstructionBuilder {
    token_program_id: Pubkey,
}

impl LaunchInstructionBuilder {
    pub fn new() -> Self {
        Self {
            token_program_id: token_program_id(),
        }
    }

    /// Allocate the mint account, funded rent-exempt by the wallet
    pub fn create_mint_account(&self, accounts: &LaunchAccounts) -> Instruction {
        system_instruction::create_account(
            &accounts.wallet,
            &accounts.mint,
            accounts.mint_rent,
            Mint::LEN as u64,
            &self.token_program_id,
        )
    }

    /// Initialize the mint with the wallet as mint and freeze authority
    pub fn initialize_mint(&self, accounts: &LaunchAccounts, decimals: u8) -> SdkResult<Instruction> {
        Ok(spl_token::instruction::initialize_mint(
            &self.token_program_id,
            &accounts.mint,
            &accounts.wallet,
            Some(&accounts.wallet),
            decimals,
        )?)
    }

    /// Create the wallet's associated token account for the new mint
    pub fn create_associated_token_account(&self, accounts: &LaunchAccounts) -> Instruction {
        spl_associated_token_account::instruction::create_associated_token_account(
            &accounts.wallet,
            &accounts.wallet,
            &accounts.mint,
            &self.token_program_id,
        )
    }

    /// Mint `raw_amount` base units into the wallet's associated account
    pub fn mint_initial_supply(
        &self,
        accounts: &LaunchAccounts,
        raw_amount: u64,
    ) -> SdkResult<Instruction> {
        Ok(spl_token::instruction::mint_to(
            &self.token_program_id,
            &accounts.mint,
            &accounts.associated_token_account,
            &accounts.wallet,
            &[],
            raw_amount,
        )?)
    }

    /// Create the mutable Metaplex metadata account pointing at `uri`
    pub fn create_metadata(
        &self,
        accounts: &LaunchAccounts,
        attributes: &TokenAttributes,
        uri: &str,
    ) -> SdkResult<Instruction> {
        // Name and symbol limits are enforced by form validation
        if uri.len() > MAX_URI_LENGTH {
            return Err(SdkError::InvalidParameters(format!(
                "uri is {} bytes, metadata allows at most {}",
                uri.len(),
                MAX_URI_LENGTH
            )));
        }

        let create_metadata = CreateMetadataAccountV3 {
            metadata: accounts.metadata,
            mint: accounts.mint,
            mint_authority: accounts.wallet,
            payer: accounts.wallet,
            update_authority: (accounts.wallet, true),
            system_program: system_program::id(),
            rent: Some(sysvar::rent::id()),
        };

        Ok(create_metadata.instruction(CreateMetadataAccountV3InstructionArgs {
            data: DataV2 {
                name: attributes.name.clone(),
                symbol: attributes.symbol.clone(),
                uri: uri.to_string(),
                seller_fee_basis_points: SELLER_FEE_BASIS_POINTS,
                creators: None,
                collection: None,
                uses: None,
            },
            is_mutable: true,
            collection_details: None,
        }))
    }

    /// All five launch instructions in [`LaunchStep::ORDER`]
    pub fn build_launch(
        &self,
        accounts: &LaunchAccounts,
        attributes: &TokenAttributes,
        uri: &str,
    ) -> SdkResult<Vec<Instruction>> {
        let raw_amount = raw_supply(attributes.num_tokens, attributes.num_decimals)?;

        Ok(vec![
            self.create_mint_account(accounts),
            self.initialize_mint(accounts, attributes.num_decimals)?,
            self.create_associated_token_account(accounts),
            self.mint_initial_supply(accounts, raw_amount)?,
            self.create_metadata(accounts, attributes, uri)?,
        ])
    }
}

impl Default for LaunchInstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
