use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

use crate::core::{endpoints, SdkError, SdkResult};

/// Solana cluster to launch on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Cluster {
    #[default]
    #[value(name = "mainnet-beta", alias = "mainnet")]
    #[serde(rename = "mainnet-beta", alias = "mainnet")]
    Mainnet,
    Devnet,
    Testnet,
    Localnet,
}

impl Cluster {
    /// Public RPC endpoint of the cluster
    pub fn url(&self) -> &'static str {
        match self {
            Cluster::Mainnet => endpoints::MAINNET,
            Cluster::Devnet => endpoints::DEVNET,
            Cluster::Testnet => endpoints::TESTNET,
            Cluster::Localnet => endpoints::LOCALNET,
        }
    }
}

/// Launch configuration, read from a TOML file and overridden by CLI flags
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub cluster: Cluster,

    /// Custom RPC endpoint, takes precedence over `cluster`
    pub rpc_url: Option<String>,

    /// Commitment for the transaction's blockhash
    pub commitment: CommitmentLevel,

    /// Metadata storage gateway
    pub uploader_url: String,

    /// Path to the wallet keypair file
    pub wallet: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::default(),
            rpc_url: None,
            commitment: CommitmentLevel::Finalized,
            uploader_url: "http://localhost:8787/upload".to_string(),
            wallet: "~/.config/solana/id.json".to_string(),
            timeout_secs: 30,
        }
    }
}

impl LaunchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SdkError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: LaunchConfig = toml::from_str(&content).map_err(|e| {
            SdkError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Endpoint actually used: the custom URL if set, else the cluster's
    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.cluster.url().to_string())
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.commitment,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> SdkResult<()> {
        if matches!(&self.rpc_url, Some(url) if url.trim().is_empty()) {
            return Err(SdkError::Config("rpc_url cannot be empty".to_string()));
        }
        if self.uploader_url.trim().is_empty() {
            return Err(SdkError::Config("uploader_url cannot be empty".to_string()));
        }
        if self.wallet.trim().is_empty() {
            return Err(SdkError::Config("wallet path cannot be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(SdkError::Config("timeout_secs must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_mainnet() {
        let config = LaunchConfig::default();
        assert_eq!(config.rpc_url(), endpoints::MAINNET);
        assert_eq!(config.commitment_config(), CommitmentConfig::finalized());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LaunchConfig = toml::from_str(
            r#"
            cluster = "devnet"
            uploader_url = "https://storage.example.com/upload"
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster, Cluster::Devnet);
        assert_eq!(config.rpc_url(), endpoints::DEVNET);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_custom_rpc_url_wins() {
        let config: LaunchConfig = toml::from_str(
            r#"
            cluster = "mainnet"
            rpc_url = "http://127.0.0.1:8899"
            commitment = "confirmed"
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster, Cluster::Mainnet);
        assert_eq!(config.rpc_url(), "http://127.0.0.1:8899");
        assert_eq!(config.commitment_config(), CommitmentConfig::confirmed());
    }

    #[test]
    fn test_validation_rejects_empty_endpoints() {
        let config = LaunchConfig {
            uploader_url: " ".to_string(),
            ..LaunchConfig::default()
        };
        assert!(matches!(config.validate(), Err(SdkError::Config(_))));

        let config = LaunchConfig {
            rpc_url: Some(String::new()),
            ..LaunchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = LaunchConfig::load("/nonexistent/launch.toml");
        assert!(matches!(result, Err(SdkError::Config(_))));
    }
}
