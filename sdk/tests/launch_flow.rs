//! End-to-end launch flow against in-memory chain, wallet and storage

use std::sync::Arc;

use solana_sdk::{commitment_config::CommitmentConfig, program_pack::Pack};
use spl_token::{instruction::TokenInstruction, state::Mint};
use token_launch_sdk::{
    instructions::LaunchStep,
    testing::{MockConnection, MockUploader, MockWallet, RpcCall, MINT_RENT_LAMPORTS},
    ClientHandle, ClientProvider, LaunchError, SdkError, TokenForm, TokenLauncher,
    WalletAdapter,
};

struct Harness {
    connection: Arc<MockConnection>,
    uploader: Arc<MockUploader>,
    wallet: Arc<MockWallet>,
    provider: ClientProvider,
}

impl Harness {
    fn new(connection: MockConnection, uploader: MockUploader, wallet: MockWallet) -> Self {
        let connection = Arc::new(connection);
        let uploader = Arc::new(uploader);
        let wallet = Arc::new(wallet);
        let provider = ClientProvider::new(connection.clone(), uploader.clone())
            .with_wallet(wallet.clone());
        Self {
            connection,
            uploader,
            wallet,
            provider,
        }
    }

    fn happy() -> Self {
        Self::new(
            MockConnection::default(),
            MockUploader::returning("ar://abc"),
            MockWallet::new(),
        )
    }

    fn handle(&self) -> Arc<ClientHandle> {
        self.provider.handle().expect("wallet is connected")
    }
}

fn form(num_decimals: &str, supply: &str) -> TokenForm {
    TokenForm {
        name: "Feels Good".to_string(),
        num_decimals: num_decimals.to_string(),
        symbol: "FG".to_string(),
        description: Some("community token".to_string()),
        image: Some("https://example.com/fg.png".to_string()),
        num_token_initial: supply.to_string(),
    }
}

#[tokio::test]
async fn test_successful_launch_sends_five_ordered_instructions() {
    let harness = Harness::happy();
    let launcher = TokenLauncher::new();

    let receipt = launcher
        .submit(Some(harness.handle().as_ref()), &form("2", "100"))
        .await
        .unwrap();

    let sent = harness.connection.sent();
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];

    let steps: Vec<_> = tx
        .message
        .instructions
        .iter()
        .map(|ix| {
            let program_id = tx.message.account_keys[ix.program_id_index as usize];
            let accounts = ix
                .accounts
                .iter()
                .map(|&i| {
                    solana_sdk::instruction::AccountMeta::new_readonly(
                        tx.message.account_keys[i as usize],
                        false,
                    )
                })
                .collect();
            let ix = solana_sdk::instruction::Instruction {
                program_id,
                accounts,
                data: ix.data.clone(),
            };
            LaunchStep::of(&ix)
        })
        .collect();
    let expected: Vec<_> = LaunchStep::ORDER.iter().copied().map(Some).collect();
    assert_eq!(steps, expected);

    // Fee payer is the wallet, both the wallet and the mint signed
    let wallet = harness.wallet.pubkey().unwrap();
    assert_eq!(tx.message.account_keys[0], wallet);
    assert!(tx.message.account_keys.contains(&receipt.mint));
    assert!(tx.is_signed());
    assert!(tx.verify().is_ok());
    assert_eq!(tx.message.recent_blockhash, harness.connection.blockhash());
    assert_eq!(receipt.signature, tx.signatures[0]);
    assert_eq!(harness.wallet.signed_count(), 1);
}

#[tokio::test]
async fn test_mint_to_amount_is_scaled_by_decimals() {
    let harness = Harness::happy();
    let receipt = TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &form("2", "100"))
        .await
        .unwrap();

    assert_eq!(receipt.raw_supply, 10_000);

    let tx = &harness.connection.sent()[0];
    let mint_to = &tx.message.instructions[3];
    match TokenInstruction::unpack(&mint_to.data).unwrap() {
        TokenInstruction::MintTo { amount } => assert_eq!(amount, 10_000),
        other => panic!("unexpected instruction {:?}", other),
    }
}

#[tokio::test]
async fn test_attributes_record_uploaded_uri() {
    let harness = Harness::happy();
    let launcher = TokenLauncher::new();
    let input = form("6", "1000");

    let receipt = launcher
        .submit(Some(harness.handle().as_ref()), &input)
        .await
        .unwrap();

    let expected = input.validate().unwrap().with_metadata_url("ar://abc");
    assert_eq!(receipt.attributes, expected);
    assert_eq!(launcher.current_attempt(), Some(expected));

    let uploads = harness.uploader.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].name, "Feels Good");
    assert_eq!(uploads[0].symbol, "FG");
    assert_eq!(uploads[0].description.as_deref(), Some("community token"));
    assert_eq!(uploads[0].image.as_deref(), Some("https://example.com/fg.png"));
}

#[tokio::test]
async fn test_rpc_calls_follow_launch_order() {
    let harness = Harness::happy();
    TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &form("9", "1"))
        .await
        .unwrap();

    assert_eq!(
        harness.connection.calls(),
        vec![
            RpcCall::GetMinimumBalanceForRentExemption(Mint::LEN),
            RpcCall::GetLatestBlockhash(CommitmentConfig::finalized()),
            RpcCall::SendTransaction,
        ]
    );
}

#[tokio::test]
async fn test_mint_account_funded_with_rent() {
    let harness = Harness::happy();
    let receipt = TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &form("0", "5"))
        .await
        .unwrap();

    let tx = &harness.connection.sent()[0];
    let create = &tx.message.instructions[0];
    // SystemInstruction::CreateAccount { lamports, space, owner }
    assert_eq!(&create.data[4..12], &MINT_RENT_LAMPORTS.to_le_bytes());
    assert_eq!(&create.data[12..20], &(Mint::LEN as u64).to_le_bytes());
    assert_eq!(
        tx.message.account_keys[create.accounts[1] as usize],
        receipt.mint
    );
}

#[tokio::test]
async fn test_invalid_form_makes_no_network_call() {
    let harness = Harness::happy();
    let launcher = TokenLauncher::new();

    for decimals in ["10", "-1", "2.5", "abc"] {
        let result = launcher
            .submit(Some(harness.handle().as_ref()), &form(decimals, "100"))
            .await;
        match result {
            Err(LaunchError::Validation(errors)) => {
                assert!(errors.get("numDecimals").is_some(), "decimals {:?}", decimals)
            }
            other => panic!("expected validation error, got {:?}", other.map(|r| r.mint)),
        }
    }

    let mut missing = form("2", "100");
    missing.name = String::new();
    missing.symbol = "  ".to_string();
    match launcher.submit(Some(harness.handle().as_ref()), &missing).await {
        Err(LaunchError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get("name").unwrap().to_string(), "name is a required field");
            assert_eq!(
                errors.get("symbol").unwrap().to_string(),
                "symbol is a required field"
            );
        }
        other => panic!("expected validation error, got {:?}", other.map(|r| r.mint)),
    }

    assert!(harness.uploader.uploads().is_empty());
    assert!(harness.connection.calls().is_empty());
    assert!(launcher.current_attempt().is_none());
}

#[tokio::test]
async fn test_missing_client_aborts_before_upload() {
    let harness = Harness::happy();
    let launcher = TokenLauncher::new();

    let result = launcher.submit(None, &form("2", "100")).await;

    assert!(matches!(result, Err(LaunchError::ClientUnavailable)));
    assert!(harness.uploader.uploads().is_empty());
    assert!(harness.connection.calls().is_empty());
    // The validated snapshot is still visible for display
    assert_eq!(
        launcher.current_attempt().map(|a| a.metadata_url),
        Some(None)
    );
}

#[tokio::test]
async fn test_disconnected_wallet_has_no_client() {
    let harness = Harness::new(
        MockConnection::default(),
        MockUploader::returning("ar://abc"),
        MockWallet::disconnected(),
    );
    let handle = harness.provider.handle();

    let result = TokenLauncher::new()
        .submit(handle.as_deref(), &form("2", "100"))
        .await;

    assert!(matches!(result, Err(LaunchError::ClientUnavailable)));
    assert!(harness.uploader.uploads().is_empty());
}

#[tokio::test]
async fn test_upload_failure_builds_nothing() {
    let harness = Harness::new(
        MockConnection::default(),
        MockUploader::failing("gateway timeout"),
        MockWallet::new(),
    );

    let result = TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &form("2", "100"))
        .await;

    match result {
        Err(LaunchError::Upload(SdkError::Storage(message))) => {
            assert_eq!(message, "gateway timeout")
        }
        other => panic!("expected upload error, got {:?}", other.map(|r| r.mint)),
    }
    assert_eq!(harness.uploader.uploads().len(), 1);
    assert!(harness.connection.calls().is_empty());
    assert!(harness.connection.sent().is_empty());
    assert_eq!(harness.wallet.signed_count(), 0);
}

#[tokio::test]
async fn test_wallet_rejection_is_transaction_error() {
    let harness = Harness::new(
        MockConnection::default(),
        MockUploader::returning("ar://abc"),
        MockWallet::rejecting(),
    );

    let result = TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &form("2", "100"))
        .await;

    assert!(matches!(
        result,
        Err(LaunchError::Transaction(SdkError::Wallet(_)))
    ));
    assert!(harness.connection.sent().is_empty());
}

#[tokio::test]
async fn test_broadcast_failure_is_transaction_error() {
    let harness = Harness::new(
        MockConnection::failing_send("blockhash not found"),
        MockUploader::returning("ar://abc"),
        MockWallet::new(),
    );

    let result = TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &form("2", "100"))
        .await;

    assert!(matches!(
        result,
        Err(LaunchError::Transaction(SdkError::Rpc(_)))
    ));
    assert_eq!(harness.wallet.signed_count(), 1);
}

#[tokio::test]
async fn test_oversized_supply_fails_before_broadcast() {
    let harness = Harness::happy();

    let result = TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &form("9", "100000000000"))
        .await;

    assert!(matches!(
        result,
        Err(LaunchError::Transaction(SdkError::MathOverflow))
    ));
    assert!(harness.connection.sent().is_empty());
}

#[tokio::test]
async fn test_repeated_submit_launches_distinct_tokens() {
    let harness = Harness::happy();
    let launcher = TokenLauncher::new();
    let input = form("2", "100");

    let first = launcher
        .submit(Some(harness.handle().as_ref()), &input)
        .await
        .unwrap();
    let second = launcher
        .submit(Some(harness.handle().as_ref()), &input)
        .await
        .unwrap();

    assert_ne!(first.mint, second.mint);
    assert_ne!(first.associated_token_account, second.associated_token_account);
    assert_ne!(first.metadata_account, second.metadata_account);
    assert_eq!(harness.connection.sent().len(), 2);
    assert_eq!(harness.uploader.uploads().len(), 2);
}

#[tokio::test]
async fn test_oversized_name_rejected_before_upload() {
    let harness = Harness::happy();
    let mut input = form("2", "100");
    input.name = "N".repeat(33);

    let result = TokenLauncher::new()
        .submit(Some(harness.handle().as_ref()), &input)
        .await;

    match result {
        Err(LaunchError::Validation(errors)) => {
            assert_eq!(errors.get("name").unwrap().to_string(), "name must be at most 32 bytes")
        }
        other => panic!("expected validation error, got {:?}", other.map(|r| r.mint)),
    }
    assert!(harness.uploader.uploads().is_empty());
    assert!(harness.connection.calls().is_empty());
}
