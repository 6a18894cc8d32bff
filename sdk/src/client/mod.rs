//! Boundaries to the outside world: the chain RPC node, the signing wallet
//! and the metadata storage service.

pub mod connection;
pub mod storage;
pub mod wallet;

pub use connection::{ChainConnection, RpcConnection};
pub use storage::{HttpMetadataUploader, MetadataUploader};
pub use wallet::{KeypairWallet, WalletAdapter};
