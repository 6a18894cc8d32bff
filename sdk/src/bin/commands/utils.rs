// Utility functions for CLI commands

use anyhow::{Context, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};
use std::str::FromStr;
use token_launch_sdk::{Cluster, LaunchConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Flag values that take precedence over the config file
pub struct Overrides {
    pub cluster: Option<Cluster>,
    pub rpc_url: Option<String>,
    pub wallet: Option<String>,
    pub uploader_url: Option<String>,
}

/// Initialize tracing, RUST_LOG wins over `level`
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("token_launch_sdk={},token_launch={}", level, level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load the config file if given, then apply flag overrides
pub fn resolve_config(path: Option<&str>, overrides: Overrides) -> Result<LaunchConfig> {
    let mut config = match path {
        Some(path) => LaunchConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => LaunchConfig::default(),
    };

    if let Some(cluster) = overrides.cluster {
        config.cluster = cluster;
        config.rpc_url = None;
    }
    if let Some(rpc_url) = overrides.rpc_url {
        config.rpc_url = Some(rpc_url);
    }
    if let Some(wallet) = overrides.wallet {
        config.wallet = wallet;
    }
    if let Some(uploader_url) = overrides.uploader_url {
        config.uploader_url = uploader_url;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Load a keypair from a file path, expanding ~ if needed
pub fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded_path = if path.starts_with('~') {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        path.replacen('~', &home, 1)
    } else {
        path.to_string()
    };

    read_keypair_file(&expanded_path)
        .map_err(|e| anyhow::anyhow!("Failed to load keypair from {}: {}", expanded_path, e))
}

/// Parse a pubkey from string
pub fn parse_pubkey(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).with_context(|| format!("Invalid public key: {}", s))
}

/// Print success message
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}

/// Print error message
pub fn error(msg: &str) {
    eprintln!("[ERROR] {}", msg);
}
