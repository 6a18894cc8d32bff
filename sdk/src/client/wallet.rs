use async_trait::async_trait;
use solana_sdk::{
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use tracing::debug;

use super::ChainConnection;
use crate::{core::SdkResult, prelude::*};

/// Signing capability of a connected wallet.
///
/// Not tied to any wallet implementation: a local keypair, a hardware device
/// or a remote signer all fit behind this trait.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Public key of the connected account, `None` while disconnected
    fn pubkey(&self) -> Option<Pubkey>;

    /// Add the wallet's signature to a transaction that already carries its
    /// recent blockhash
    async fn sign_transaction(&self, transaction: Transaction) -> SdkResult<Transaction>;

    /// Countersign and broadcast through `connection`
    async fn send_transaction(
        &self,
        transaction: Transaction,
        connection: &dyn ChainConnection,
    ) -> SdkResult<Signature> {
        let signed = self.sign_transaction(transaction).await?;
        connection.send_transaction(&signed).await
    }
}

/// Wallet backed by a keypair held in memory
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn pubkey(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> SdkResult<Transaction> {
        let blockhash = transaction.message.recent_blockhash;
        transaction.try_partial_sign(&[&self.keypair], blockhash)?;
        debug!(signer = %self.keypair.pubkey(), "wallet signed transaction");
        Ok(transaction)
    }
}
