//! Client handle and the provider that keeps it in sync with the active
//! connection and wallet.
//!
//! The handle is immutable. Whenever the connection or the wallet changes the
//! provider builds a new one and swaps it in; holders of the previous `Arc`
//! keep a consistent view until they drop it.

use std::sync::Arc;

use tracing::debug;

use crate::{
    client::{ChainConnection, MetadataUploader, WalletAdapter},
    instructions::LaunchInstructionBuilder,
    prelude::*,
    protocol::PdaBuilder,
};

/// SDK client bound to one connection and one wallet identity
pub struct ClientHandle {
    connection: Arc<dyn ChainConnection>,
    wallet: Arc<dyn WalletAdapter>,
    uploader: Arc<dyn MetadataUploader>,
    identity: Pubkey,
    pda: PdaBuilder,
    instructions: LaunchInstructionBuilder,
}

impl ClientHandle {
    /// Bind a connection and a connected wallet. Returns `None` while the
    /// wallet has no public key.
    pub fn new(
        connection: Arc<dyn ChainConnection>,
        wallet: Arc<dyn WalletAdapter>,
        uploader: Arc<dyn MetadataUploader>,
    ) -> Option<Self> {
        let identity = wallet.pubkey()?;
        Some(Self {
            connection,
            wallet,
            uploader,
            identity,
            pda: PdaBuilder::new(),
            instructions: LaunchInstructionBuilder::new(),
        })
    }

    /// Public key of the wallet this handle signs with
    pub fn identity(&self) -> Pubkey {
        self.identity
    }

    pub fn connection(&self) -> &dyn ChainConnection {
        self.connection.as_ref()
    }

    pub fn wallet(&self) -> &dyn WalletAdapter {
        self.wallet.as_ref()
    }

    pub fn uploader(&self) -> &dyn MetadataUploader {
        self.uploader.as_ref()
    }

    pub fn pda(&self) -> &PdaBuilder {
        &self.pda
    }

    pub fn instructions(&self) -> &LaunchInstructionBuilder {
        &self.instructions
    }
}

/// Owns the current connection and wallet and derives the shared
/// [`ClientHandle`] from them
pub struct ClientProvider {
    connection: Arc<dyn ChainConnection>,
    wallet: Option<Arc<dyn WalletAdapter>>,
    uploader: Arc<dyn MetadataUploader>,
    handle: Option<Arc<ClientHandle>>,
}

impl ClientProvider {
    pub fn new(connection: Arc<dyn ChainConnection>, uploader: Arc<dyn MetadataUploader>) -> Self {
        Self {
            connection,
            wallet: None,
            uploader,
            handle: None,
        }
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletAdapter>) -> Self {
        self.set_wallet(Some(wallet));
        self
    }

    /// Current handle, `None` until a connected wallet is present
    pub fn handle(&self) -> Option<Arc<ClientHandle>> {
        self.handle.clone()
    }

    /// Switch networks. A no-op when `connection` is the current one.
    pub fn set_connection(&mut self, connection: Arc<dyn ChainConnection>) {
        if same(&self.connection, &connection) {
            return;
        }
        self.connection = connection;
        self.rebuild();
    }

    /// Connect, switch or disconnect the wallet. A no-op when neither the
    /// adapter nor the account it exposes changed.
    pub fn set_wallet(&mut self, wallet: Option<Arc<dyn WalletAdapter>>) {
        let unchanged = match (&self.wallet, &wallet) {
            (Some(current), Some(new)) => same(current, new) && !self.identity_changed(),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        self.wallet = wallet;
        self.rebuild();
    }

    /// Rebuild the handle if the current adapter now exposes a different
    /// account, or none
    pub fn refresh(&mut self) {
        if self.identity_changed() {
            self.rebuild();
        }
    }

    fn identity_changed(&self) -> bool {
        let current = self.wallet.as_ref().and_then(|wallet| wallet.pubkey());
        current != self.handle.as_ref().map(|handle| handle.identity())
    }

    fn rebuild(&mut self) {
        self.handle = self.wallet.as_ref().and_then(|wallet| {
            ClientHandle::new(self.connection.clone(), wallet.clone(), self.uploader.clone())
                .map(Arc::new)
        });

        match &self.handle {
            Some(handle) => debug!(
                identity = %handle.identity(),
                rpc_url = %handle.connection().rpc_url(),
                "client handle rebuilt"
            ),
            None => debug!("client handle cleared, no connected wallet"),
        }
    }
}

fn same<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
