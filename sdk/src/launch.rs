//! Token launch flow
//!
//! Validate, upload metadata, build the five-instruction transaction, co-sign
//! with a fresh mint keypair and let the wallet countersign and broadcast.
//! Nothing reaches the chain before the final broadcast, and the broadcast is
//! a single atomic transaction, so a failure at any step leaves no partial
//! on-chain state to unwind.

use std::sync::RwLock;

use solana_sdk::{
    commitment_config::CommitmentConfig,
    program_pack::Pack,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use spl_token::state::Mint;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    core::{LaunchAccounts, LaunchReceipt, SdkError, TokenAttributes},
    form::{FormErrors, TokenForm},
    instructions::raw_supply,
    provider::ClientHandle,
};

/// Why a launch attempt stopped
#[derive(Error, Debug)]
pub enum LaunchError {
    /// One or more form fields are invalid, nothing was sent anywhere
    #[error("invalid token attributes:\n{0}")]
    Validation(#[from] FormErrors),

    /// No client handle: the wallet is not connected
    #[error("client not initialized, connect a wallet first")]
    ClientUnavailable,

    /// Metadata upload failed before any transaction was built
    #[error("metadata upload failed: {0}")]
    Upload(#[source] SdkError),

    /// Building, signing or broadcasting the transaction failed
    #[error("launch transaction failed: {0}")]
    Transaction(#[source] SdkError),
}

pub type LaunchResult<T> = Result<T, LaunchError>;

/// Drives launch attempts and remembers the attributes of the latest one.
///
/// Submissions are not serialized: two overlapping calls produce two
/// independent mints.
pub struct TokenLauncher {
    current: RwLock<Option<TokenAttributes>>,
    commitment: CommitmentConfig,
}

impl TokenLauncher {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            commitment: CommitmentConfig::finalized(),
        }
    }

    /// Commitment used when fetching the transaction's blockhash
    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    /// Attributes of the most recent attempt, including the metadata URI once
    /// uploaded
    pub fn current_attempt(&self) -> Option<TokenAttributes> {
        self.current.read().ok().and_then(|current| current.clone())
    }

    fn record(&self, attributes: &TokenAttributes) {
        if let Ok(mut current) = self.current.write() {
            *current = Some(attributes.clone());
        }
    }

    /// Validate `form` and launch the token through `handle`
    pub async fn submit(
        &self,
        handle: Option<&ClientHandle>,
        form: &TokenForm,
    ) -> LaunchResult<LaunchReceipt> {
        let attributes = form.validate()?;
        self.record(&attributes);

        let handle = handle.ok_or_else(|| {
            warn!("launch aborted, client not initialized");
            LaunchError::ClientUnavailable
        })?;

        self.launch(handle, attributes).await
    }

    async fn launch(
        &self,
        handle: &ClientHandle,
        attributes: TokenAttributes,
    ) -> LaunchResult<LaunchReceipt> {
        attributes.check()?;

        let uploaded = handle
            .uploader()
            .upload_metadata(&attributes.metadata_payload())
            .await
            .map_err(|e| {
                warn!(error = %e, "metadata upload failed");
                LaunchError::Upload(e)
            })?;
        let attributes = attributes.with_metadata_url(uploaded.uri.clone());
        self.record(&attributes);
        debug!(uri = %uploaded.uri, "metadata uploaded");

        self.send_launch(handle, attributes, &uploaded.uri)
            .await
            .map_err(|e| {
                warn!(error = %e, "launch transaction failed");
                LaunchError::Transaction(e)
            })
    }

    async fn send_launch(
        &self,
        handle: &ClientHandle,
        attributes: TokenAttributes,
        uri: &str,
    ) -> Result<LaunchReceipt, SdkError> {
        let wallet = handle.identity();
        let mint_keypair = Keypair::new();
        let mint = mint_keypair.pubkey();

        let mint_rent = handle
            .connection()
            .get_minimum_balance_for_rent_exemption(Mint::LEN)
            .await?;

        let accounts = LaunchAccounts {
            wallet,
            mint,
            associated_token_account: handle.pda().associated_token_account(&wallet, &mint),
            metadata: handle.pda().metadata(&mint).0,
            mint_rent,
        };
        debug!(
            %mint,
            ata = %accounts.associated_token_account,
            metadata = %accounts.metadata,
            mint_rent,
            "derived launch accounts"
        );

        let raw_amount = raw_supply(attributes.num_tokens, attributes.num_decimals)?;
        let instructions = handle
            .instructions()
            .build_launch(&accounts, &attributes, uri)?;

        let blockhash = handle
            .connection()
            .get_latest_blockhash(self.commitment)
            .await?;

        let mut transaction = Transaction::new_with_payer(&instructions, Some(&wallet));
        transaction.try_partial_sign(&[&mint_keypair], blockhash)?;

        let signature = handle
            .wallet()
            .send_transaction(transaction, handle.connection())
            .await?;

        info!(%mint, %signature, "token launched");

        Ok(LaunchReceipt {
            mint,
            associated_token_account: accounts.associated_token_account,
            metadata_account: accounts.metadata,
            signature,
            raw_supply: raw_amount,
            attributes,
        })
    }
}

impl Default for TokenLauncher {
    fn default() -> Self {
        Self::new()
    }
}
