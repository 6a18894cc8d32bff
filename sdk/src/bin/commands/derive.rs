// Address derivation command

use anyhow::Result;
use clap::Args;
use solana_sdk::signature::Signer;
use token_launch_sdk::{protocol::PdaBuilder, LaunchConfig};

use super::utils::{info, load_keypair, parse_pubkey};

#[derive(Args)]
pub struct DeriveCmd {
    /// Mint address
    #[arg(long)]
    mint: String,

    /// Token account owner (defaults to the wallet)
    #[arg(long)]
    owner: Option<String>,
}

pub fn execute(cmd: DeriveCmd, config: &LaunchConfig) -> Result<()> {
    let mint = parse_pubkey(&cmd.mint)?;
    let owner = match cmd.owner {
        Some(owner) => parse_pubkey(&owner)?,
        None => load_keypair(&config.wallet)?.pubkey(),
    };

    let pda = PdaBuilder::new();
    let (metadata, bump) = pda.metadata(&mint);

    info(&format!("Mint: {}", mint));
    info(&format!("Metadata account: {} (bump {})", metadata, bump));
    info(&format!(
        "Associated token account of {}: {}",
        owner,
        pda.associated_token_account(&owner, &mint)
    ));

    Ok(())
}
