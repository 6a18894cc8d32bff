// Token creation command

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use token_launch_sdk::{
    ClientProvider, FormErrors, HttpMetadataUploader, KeypairWallet, LaunchConfig, LaunchError,
    LaunchReceipt, RpcConnection, TokenForm, TokenLauncher,
};
use tracing::warn;

use super::utils::{error, info, load_keypair, success};

#[derive(Args)]
pub struct CreateCmd {
    /// Token name
    #[arg(long, default_value = "")]
    name: String,

    /// Number of decimals (0-9)
    #[arg(long = "decimals", default_value = "")]
    num_decimals: String,

    /// Token symbol
    #[arg(long, default_value = "")]
    symbol: String,

    /// Description stored in the metadata document
    #[arg(long)]
    description: Option<String>,

    /// Image URL stored in the metadata document
    #[arg(long)]
    image: Option<String>,

    /// Number of tokens to mint initially
    #[arg(long = "supply", default_value = "")]
    num_token_initial: String,

    /// Validate and print the attributes without uploading or sending
    #[arg(long)]
    dry_run: bool,

    /// Print the receipt as JSON
    #[arg(long)]
    json: bool,
}

impl CreateCmd {
    fn form(&self) -> TokenForm {
        TokenForm {
            name: self.name.clone(),
            num_decimals: self.num_decimals.clone(),
            symbol: self.symbol.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            num_token_initial: self.num_token_initial.clone(),
        }
    }
}

pub async fn execute(cmd: CreateCmd, config: &LaunchConfig) -> Result<()> {
    let form = cmd.form();

    if cmd.dry_run {
        let attributes = match form.validate() {
            Ok(attributes) => attributes,
            Err(errors) => return Err(report_invalid(LaunchError::Validation(errors))),
        };
        success("Token attributes are valid");
        println!("{}", serde_json::to_string_pretty(&attributes)?);
        return Ok(());
    }

    let connection = Arc::new(RpcConnection::with_timeout(config.rpc_url(), config.timeout()));
    let uploader = Arc::new(HttpMetadataUploader::with_timeout(
        config.uploader_url.clone(),
        config.timeout(),
    ));
    let mut provider = ClientProvider::new(connection, uploader);

    match load_keypair(&config.wallet) {
        Ok(keypair) => provider.set_wallet(Some(Arc::new(KeypairWallet::new(keypair)))),
        Err(e) => warn!(error = %e, "no wallet connected"),
    }

    info(&format!("Launching token on {}", config.rpc_url()));

    let handle = provider.handle();
    let launcher = TokenLauncher::new().with_commitment(config.commitment_config());

    match launcher.submit(handle.as_deref(), &form).await {
        Ok(receipt) => {
            print_receipt(&receipt, cmd.json)?;
            Ok(())
        }
        Err(e @ LaunchError::Validation(_)) => Err(report_invalid(e)),
        Err(e) => {
            if let Some(attempt) = launcher.current_attempt() {
                if let Some(uri) = attempt.metadata_url {
                    info(&format!("Metadata was uploaded to {}", uri));
                }
            }
            Err(e).context("Token launch failed")
        }
    }
}

fn report_invalid(e: LaunchError) -> anyhow::Error {
    if let LaunchError::Validation(errors) = &e {
        for line in field_lines(errors) {
            error(&line);
        }
    }
    anyhow::Error::new(e)
}

/// One `field: reason` line per rejected field
fn field_lines(errors: &FormErrors) -> Vec<String> {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field(), e.violation()))
        .collect()
}

fn print_receipt(receipt: &LaunchReceipt, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(receipt)?);
        return Ok(());
    }

    success(&format!("Token launched! Mint: {}", receipt.mint));
    info(&format!("Signature: {}", receipt.signature));
    info(&format!("Token account: {}", receipt.associated_token_account));
    info(&format!("Metadata account: {}", receipt.metadata_account));
    info(&format!(
        "Minted {} base units ({} {})",
        receipt.raw_supply, receipt.attributes.num_tokens, receipt.attributes.symbol
    ));
    if let Some(uri) = &receipt.attributes.metadata_url {
        info(&format!("Metadata URI: {}", uri));
    }
    Ok(())
}
