//! Testing utilities for token launches
//!
//! In-memory stand-ins for the RPC node, the wallet and the storage service.
//! Every call is recorded so tests can assert what did and did not happen.

use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    signature::{Keypair, Signer},
    transaction::Transaction,
};

use crate::{
    client::{ChainConnection, MetadataUploader, WalletAdapter},
    core::{MetadataPayload, SdkError, SdkResult, UploadedMetadata},
    prelude::*,
};

/// Rent-exempt minimum of an 82-byte mint on mainnet
pub const MINT_RENT_LAMPORTS: u64 = 1_461_600;

/// A call observed by [`MockConnection`]
#[derive(Clone, Debug, PartialEq)]
pub enum RpcCall {
    GetLatestBlockhash(CommitmentConfig),
    GetMinimumBalanceForRentExemption(usize),
    SendTransaction,
}

/// Chain connection answering from memory
pub struct MockConnection {
    blockhash: Hash,
    rent: u64,
    fail_send: Option<String>,
    calls: Mutex<Vec<RpcCall>>,
    sent: Mutex<Vec<Transaction>>,
}

impl Default for MockConnection {
    fn default() -> Self {
        Self {
            blockhash: Hash::new_unique(),
            rent: MINT_RENT_LAMPORTS,
            fail_send: None,
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl MockConnection {
    /// Broadcasts fail with `message`
    pub fn failing_send(message: &str) -> Self {
        Self {
            fail_send: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn blockhash(&self) -> Hash {
        self.blockhash
    }

    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Transactions that reached `send_transaction`
    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn log(&self, call: RpcCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl ChainConnection for MockConnection {
    fn rpc_url(&self) -> String {
        "mock://localnet".to_string()
    }

    async fn get_latest_blockhash(&self, commitment: CommitmentConfig) -> SdkResult<Hash> {
        self.log(RpcCall::GetLatestBlockhash(commitment));
        Ok(self.blockhash)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> SdkResult<u64> {
        self.log(RpcCall::GetMinimumBalanceForRentExemption(data_len));
        Ok(self.rent)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> SdkResult<Signature> {
        self.log(RpcCall::SendTransaction);
        if let Some(message) = &self.fail_send {
            return Err(SdkError::Rpc(message.clone()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(transaction.clone());
        }
        Ok(transaction.signatures.first().copied().unwrap_or_default())
    }
}

/// Wallet signing with an in-memory keypair, optionally refusing to sign.
///
/// The account can be connected, switched or disconnected at runtime while
/// the adapter itself stays the same object.
pub struct MockWallet {
    keypair: RwLock<Option<Arc<Keypair>>>,
    reject: bool,
    signed: Mutex<usize>,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            keypair: RwLock::new(Some(Arc::new(Keypair::new()))),
            reject: false,
            signed: Mutex::new(0),
        }
    }

    /// A wallet with no connected account
    pub fn disconnected() -> Self {
        Self {
            keypair: RwLock::new(None),
            ..Self::new()
        }
    }

    /// The user declines every signature request
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }

    /// Connect a fresh account, replacing any current one
    pub fn connect(&self) -> Pubkey {
        let keypair = Keypair::new();
        let pubkey = keypair.pubkey();
        if let Ok(mut current) = self.keypair.write() {
            *current = Some(Arc::new(keypair));
        }
        pubkey
    }

    pub fn disconnect(&self) {
        if let Ok(mut current) = self.keypair.write() {
            *current = None;
        }
    }

    /// Number of signatures produced
    pub fn signed_count(&self) -> usize {
        self.signed.lock().map(|n| *n).unwrap_or_default()
    }

    fn keypair(&self) -> Option<Arc<Keypair>> {
        self.keypair.read().ok().and_then(|k| k.clone())
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletAdapter for MockWallet {
    fn pubkey(&self) -> Option<Pubkey> {
        self.keypair().map(|k| k.pubkey())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> SdkResult<Transaction> {
        let keypair = self
            .keypair()
            .ok_or_else(|| SdkError::Wallet("wallet not connected".to_string()))?;
        if self.reject {
            return Err(SdkError::Wallet("user rejected the request".to_string()));
        }
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&*keypair], blockhash)?;
        if let Ok(mut signed) = self.signed.lock() {
            *signed += 1;
        }
        Ok(transaction)
    }
}

/// Storage uploader returning a fixed URI or a fixed failure
pub struct MockUploader {
    result: Result<String, String>,
    uploads: Mutex<Vec<MetadataPayload>>,
}

impl MockUploader {
    pub fn returning(uri: &str) -> Self {
        Self {
            result: Ok(uri.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received, in order
    pub fn uploads(&self) -> Vec<MetadataPayload> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MetadataUploader for MockUploader {
    async fn upload_metadata(&self, payload: &MetadataPayload) -> SdkResult<UploadedMetadata> {
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push(payload.clone());
        }
        match &self.result {
            Ok(uri) => Ok(UploadedMetadata { uri: uri.clone() }),
            Err(message) => Err(SdkError::Storage(message.clone())),
        }
    }
}
