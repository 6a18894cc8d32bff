//! Token Launch SDK
//!
//! Launches a fungible SPL token in one atomic transaction:
//! - field-level validation of the token form
//! - off-chain metadata upload
//! - mint, associated token account, initial supply and Metaplex metadata
//!   created together, signed by a fresh mint keypair and the user's wallet
pub mod client;
pub mod config;
pub mod core;
pub mod form;
pub mod instructions;
pub mod launch;
pub mod prelude;
pub mod protocol;
pub mod provider;
pub mod testing;

pub use crate::client::*;
pub use crate::config::*;
pub use crate::core::*;
pub use form::{FieldError, FormErrors, TokenForm, Violation};
pub use launch::{LaunchError, LaunchResult, TokenLauncher};
pub use provider::{ClientHandle, ClientProvider};
