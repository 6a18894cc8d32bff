// CLI tool for launching fungible tokens
//
// Collects the token attributes as flags, validates them, uploads the
// metadata document and sends the launch transaction signed by the wallet.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use token_launch_sdk::Cluster;

#[derive(Parser)]
#[command(name = "token-launch")]
#[command(about = "Launch a fungible SPL token with Metaplex metadata", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Cluster to launch on
    #[arg(long, value_enum)]
    cluster: Option<Cluster>,

    /// Custom RPC URL (overrides --cluster)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Path to wallet keypair file
    #[arg(long)]
    wallet: Option<String>,

    /// Metadata storage gateway URL
    #[arg(long)]
    uploader_url: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new token and mint its initial supply
    Create(commands::create::CreateCmd),

    /// Print the metadata and token accounts derived for a mint
    Derive(commands::derive::DeriveCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    commands::utils::init_logging(&cli.log_level);

    let config = commands::utils::resolve_config(
        cli.config.as_deref(),
        commands::utils::Overrides {
            cluster: cli.cluster,
            rpc_url: cli.rpc_url,
            wallet: cli.wallet,
            uploader_url: cli.uploader_url,
        },
    )?;

    match cli.command {
        Commands::Create(cmd) => commands::create::execute(cmd, &config).await,
        Commands::Derive(cmd) => commands::derive::execute(cmd, &config),
    }
}
