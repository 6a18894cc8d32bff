//! Lightweight Solana RPC connection
//!
//! Implements only the three calls a launch needs, over `ureq`, instead of
//! pulling in solana-client.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    transaction::Transaction,
};
use tracing::debug;

use crate::{
    core::{SdkError, SdkResult},
    prelude::*,
};

/// RPC capabilities consumed by a launch
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Endpoint this connection talks to
    fn rpc_url(&self) -> String;

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> SdkResult<Hash>;

    /// Minimum lamports keeping an account of `data_len` bytes rent-exempt
    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64>;

    /// Broadcast a fully signed transaction
    async fn send_transaction(&self, transaction: &Transaction) -> SdkResult<Signature>;
}

/// RPC response wrapper
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC connection to a Solana node
pub struct RpcConnection {
    url: String,
    agent: ureq::Agent,
    preflight_commitment: CommitmentConfig,
}

impl RpcConnection {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(timeout)
            .build();

        Self {
            url: url.into(),
            agent,
            preflight_commitment: CommitmentConfig::confirmed(),
        }
    }

    pub fn with_preflight_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.preflight_commitment = commitment;
        self
    }

    /// Make a JSON-RPC call
    async fn call<T>(&self, method: &str, params: Value) -> SdkResult<T>
    where
        T: DeserializeOwned,
    {
        let request_body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        debug!(method, "RPC call");

        // ureq is blocking
        let response_body = tokio::task::spawn_blocking({
            let agent = self.agent.clone();
            let url = self.url.clone();
            let body = request_body.to_string();

            move || {
                let response = agent
                    .post(&url)
                    .set("Content-Type", "application/json")
                    .send_string(&body)
                    .map_err(|e| SdkError::Rpc(e.to_string()))?;

                response
                    .into_string()
                    .map_err(|e| SdkError::Rpc(e.to_string()))
            }
        })
        .await
        .map_err(|e| SdkError::Rpc(format!("RPC task failed: {}", e)))??;

        let rpc_response: RpcResponse<T> = serde_json::from_str(&response_body)?;

        if let Some(error) = rpc_response.error {
            return Err(SdkError::Rpc(format!(
                "{} failed with {}: {}",
                method, error.code, error.message
            )));
        }

        rpc_response
            .result
            .ok_or_else(|| SdkError::Rpc(format!("No result in {} response", method)))
    }
}

pub(crate) fn commitment_str(commitment: CommitmentConfig) -> &'static str {
    match commitment.commitment {
        CommitmentLevel::Processed => "processed",
        CommitmentLevel::Confirmed => "confirmed",
        CommitmentLevel::Finalized => "finalized",
    }
}

#[async_trait]
impl ChainConnection for RpcConnection {
    fn rpc_url(&self) -> String {
        self.url.clone()
    }

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> SdkResult<Hash> {
        let response: Value = self
            .call(
                "getLatestBlockhash",
                json!([{ "commitment": commitment_str(commitment) }]),
            )
            .await?;

        let blockhash = response["value"]["blockhash"]
            .as_str()
            .ok_or_else(|| SdkError::Rpc("Invalid blockhash in response".to_string()))?;

        blockhash
            .parse()
            .map_err(|e| SdkError::Rpc(format!("Failed to parse blockhash: {}", e)))
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
        self.call("getMinimumBalanceForRentExemption", json!([data_len]))
            .await
    }

    async fn send_transaction(&self, transaction: &Transaction) -> SdkResult<Signature> {
        let serialized = bincode::serialize(transaction)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(serialized);

        let signature: String = self
            .call(
                "sendTransaction",
                json!([
                    encoded,
                    {
                        "encoding": "base64",
                        "preflightCommitment": commitment_str(self.preflight_commitment)
                    }
                ]),
            )
            .await?;

        signature
            .parse()
            .map_err(|e| SdkError::Rpc(format!("Failed to parse signature: {}", e)))
    }
}
