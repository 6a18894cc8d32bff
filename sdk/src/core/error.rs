//! SDK error types

use thiserror::Error;

/// Errors raised by the external boundaries (RPC, wallet, storage) and the
/// instruction builders.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// RPC error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Metadata storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Wallet rejected or failed to sign
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Instruction could not be built
    #[error("Instruction error: {0}")]
    Instruction(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    #[error("Math overflow")]
    MathOverflow,
}

impl From<solana_sdk::program_error::ProgramError> for SdkError {
    fn from(err: solana_sdk::program_error::ProgramError) -> Self {
        SdkError::Instruction(err.to_string())
    }
}

impl From<solana_sdk::signer::SignerError> for SdkError {
    fn from(err: solana_sdk::signer::SignerError) -> Self {
        SdkError::Wallet(err.to_string())
    }
}

impl From<bincode::Error> for SdkError {
    fn from(err: bincode::Error) -> Self {
        SdkError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::Config(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
