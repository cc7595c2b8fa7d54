//! Wallet connection lifecycle.
//!
//! [`SessionController`] owns the in-memory session record, drives
//! connect/disconnect through a chosen [`WalletAdapter`], and persists the
//! session across page loads via a [`SessionStore`]. Construct one per UI
//! root and inject it into consumers; there is no process-wide singleton.

use pk_types::{PersistedSession, WalletAddress};
use pk_wallet::{AdapterRegistry, WalletAdapter, WalletError};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

mod store;

pub use store::{InMemoryStore, NoopStore, SessionStore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a wallet connect is already in progress")]
    ConnectInFlight,
    #[error("unknown wallet: {0}")]
    UnknownWallet(String),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// In-memory record of the current wallet connection.
///
/// Invariant: `address` and `wallet_name` are both present or both absent,
/// and the session counts as connected iff `address` is present. Only the
/// controller mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Option<WalletAddress>,
    pub wallet_name: Option<String>,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

pub struct SessionController<S: SessionStore> {
    registry: AdapterRegistry,
    store: S,
    session: WalletSession,
    connecting: bool,
    last_error: Option<String>,
}

impl<S: SessionStore> SessionController<S> {
    pub fn new(registry: AdapterRegistry, store: S) -> Self {
        Self {
            registry,
            store,
            session: WalletSession::default(),
            connecting: false,
            last_error: None,
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn state(&self) -> ConnectionState {
        if self.connecting {
            ConnectionState::Connecting
        } else if self.session.is_connected() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Last connect failure, shown in the connect UI. Survives until the
    /// next connect attempt or an explicit [`clear_error`](Self::clear_error).
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Currently installed adapters, recomputed on every call.
    pub fn available_wallets(&self) -> Vec<Arc<dyn WalletAdapter>> {
        self.registry.installed()
    }

    /// Enter the `Connecting` state and hand back the adapter whose
    /// extension handshake the caller must now await. Rejects a second
    /// request while one is in flight; the caller finishes the transition
    /// with [`complete_connect`](Self::complete_connect).
    ///
    /// Split from the await so a single-threaded UI never holds a borrow of
    /// the controller across the extension handshake.
    pub fn begin_connect(
        &mut self,
        wallet_name: &str,
    ) -> Result<Arc<dyn WalletAdapter>, SessionError> {
        if self.connecting {
            return Err(SessionError::ConnectInFlight);
        }
        self.last_error = None;
        let Some(adapter) = self.registry.find(wallet_name) else {
            let err = SessionError::UnknownWallet(wallet_name.to_owned());
            self.last_error = Some(err.to_string());
            return Err(err);
        };
        self.connecting = true;
        Ok(adapter)
    }

    /// Apply the outcome of the extension handshake started by
    /// [`begin_connect`](Self::begin_connect). Success records the session
    /// and persists it; failure records the error message and leaves the
    /// session disconnected. Persistence failures are logged, not surfaced.
    pub fn complete_connect(
        &mut self,
        wallet_name: &str,
        outcome: Result<WalletAddress, WalletError>,
    ) -> Result<(), SessionError> {
        self.connecting = false;
        match outcome {
            Ok(address) => {
                self.session = WalletSession {
                    address: Some(address.clone()),
                    wallet_name: Some(wallet_name.to_owned()),
                };
                let persisted = PersistedSession {
                    address: address.0,
                    wallet_name: wallet_name.to_owned(),
                };
                if let Err(err) = self.store.save(&persisted) {
                    warn!("failed to persist wallet session: {err:#}");
                }
                Ok(())
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Connect to the named wallet: `begin_connect`, await the extension
    /// handshake, `complete_connect`.
    pub async fn connect(&mut self, wallet_name: &str) -> Result<(), SessionError> {
        let adapter = self.begin_connect(wallet_name)?;
        let outcome = adapter.connect().await;
        self.complete_connect(wallet_name, outcome)
    }

    /// Clear the in-memory session and the persisted entry, returning the
    /// adapter (if one matches the recorded wallet and is still installed)
    /// whose extension-side disconnect the caller should invoke best-effort.
    /// Idempotent: safe to call while already disconnected, and storage
    /// cleanup always runs.
    pub fn disconnect(&mut self) -> Option<Arc<dyn WalletAdapter>> {
        let adapter = self
            .session
            .wallet_name
            .as_deref()
            .and_then(|name| self.registry.find_installed(name));
        self.session = WalletSession::default();
        if let Err(err) = self.store.clear() {
            warn!("failed to clear persisted wallet session: {err:#}");
        }
        adapter
    }

    /// [`disconnect`](Self::disconnect) plus the extension-side hangup.
    /// Extension failures are logged and swallowed; local state is already
    /// cleared either way.
    pub async fn disconnect_and_hangup(&mut self) {
        if let Some(adapter) = self.disconnect() {
            if let Err(err) = adapter.disconnect().await {
                warn!("wallet disconnect failed: {err}");
            }
        }
    }

    /// Startup rehydration, run once per page load. Restores the persisted
    /// session without re-running the extension handshake; the stored
    /// address is trusted as-is. A malformed entry, or one naming an adapter
    /// that is unknown or no longer installed, is deleted and the session
    /// stays disconnected.
    pub fn restore(&mut self) {
        let persisted = match self.store.load() {
            Ok(Some(persisted)) => persisted,
            Ok(None) => return,
            Err(err) => {
                warn!("discarding unreadable wallet session: {err:#}");
                self.remove_persisted();
                return;
            }
        };

        if self.registry.find_installed(&persisted.wallet_name).is_none() {
            self.remove_persisted();
            return;
        }

        self.session = WalletSession {
            address: Some(WalletAddress(persisted.address)),
            wallet_name: Some(persisted.wallet_name),
        };
    }

    fn remove_persisted(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!("failed to clear persisted wallet session: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use pk_types::PersistedSession;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct FakeAdapter {
        name: &'static str,
        installed: bool,
        outcome: Result<&'static str, WalletError>,
        disconnects: Rc<Cell<u32>>,
    }

    impl FakeAdapter {
        fn installed(name: &'static str, address: &'static str) -> Self {
            Self {
                name,
                installed: true,
                outcome: Ok(address),
                disconnects: Rc::default(),
            }
        }

        fn missing(name: &'static str) -> Self {
            Self {
                name,
                installed: false,
                outcome: Err(WalletError::NotInstalled(name.to_owned())),
                disconnects: Rc::default(),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                installed: true,
                outcome: Err(WalletError::ConnectionFailed(name.to_owned())),
                disconnects: Rc::default(),
            }
        }
    }

    #[async_trait(?Send)]
    impl WalletAdapter for FakeAdapter {
        fn name(&self) -> &str {
            self.name
        }

        fn icon(&self) -> &str {
            "?"
        }

        fn install_url(&self) -> &str {
            "https://example.com"
        }

        fn is_installed(&self) -> bool {
            self.installed
        }

        async fn connect(&self) -> Result<WalletAddress, WalletError> {
            self.outcome
                .as_ref()
                .map(|addr| WalletAddress((*addr).to_owned()))
                .map_err(Clone::clone)
        }

        async fn disconnect(&self) -> Result<(), WalletError> {
            self.disconnects.set(self.disconnects.get() + 1);
            Ok(())
        }
    }

    fn controller_with(
        adapters: Vec<FakeAdapter>,
        store: InMemoryStore,
    ) -> SessionController<InMemoryStore> {
        let mut registry = AdapterRegistry::default();
        for adapter in adapters {
            registry.register(Arc::new(adapter));
        }
        SessionController::new(registry, store)
    }

    #[tokio::test]
    async fn connect_success_records_and_persists_session() {
        let store = InMemoryStore::default();
        let mut controller = controller_with(
            vec![FakeAdapter::installed("Phantom", "addr123")],
            store.clone(),
        );

        controller.connect("Phantom").await.unwrap();

        assert_eq!(controller.state(), ConnectionState::Connected);
        assert!(controller.session().is_connected());
        assert_eq!(
            controller.session().address,
            Some(WalletAddress("addr123".to_owned()))
        );
        assert_eq!(controller.session().wallet_name.as_deref(), Some("Phantom"));
        assert!(controller.last_error().is_none());
        assert_eq!(
            store.load().unwrap(),
            Some(PersistedSession {
                address: "addr123".to_owned(),
                wallet_name: "Phantom".to_owned(),
            })
        );
    }

    #[tokio::test]
    async fn connect_not_installed_sets_error_and_stays_disconnected() {
        let store = InMemoryStore::default();
        let mut controller =
            controller_with(vec![FakeAdapter::missing("MetaMask")], store.clone());

        let err = controller.connect("MetaMask").await.unwrap_err();

        assert_eq!(
            err,
            SessionError::Wallet(WalletError::NotInstalled("MetaMask".to_owned()))
        );
        assert_eq!(controller.state(), ConnectionState::Disconnected);
        assert_eq!(
            controller.last_error(),
            Some("MetaMask wallet is not installed")
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn connect_failure_resets_connecting_and_allows_retry() {
        let store = InMemoryStore::default();
        let mut controller =
            controller_with(vec![FakeAdapter::failing("Phantom")], store.clone());

        controller.connect("Phantom").await.unwrap_err();
        assert_eq!(controller.state(), ConnectionState::Disconnected);
        assert_eq!(
            controller.last_error(),
            Some("failed to connect to Phantom")
        );

        // The failed attempt must not leave the in-flight guard set.
        let err = controller.connect("Phantom").await.unwrap_err();
        assert_ne!(err, SessionError::ConnectInFlight);
    }

    #[test]
    fn unknown_wallet_is_rejected_before_any_handshake() {
        let mut controller =
            controller_with(vec![FakeAdapter::installed("Phantom", "addr")], InMemoryStore::default());

        let err = controller.begin_connect("Ghost").unwrap_err();
        assert_eq!(err, SessionError::UnknownWallet("Ghost".to_owned()));
        assert_eq!(controller.last_error(), Some("unknown wallet: Ghost"));
        assert_eq!(controller.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn second_connect_while_pending_is_rejected() {
        let mut controller = controller_with(
            vec![FakeAdapter::installed("Phantom", "addr")],
            InMemoryStore::default(),
        );

        let adapter = controller.begin_connect("Phantom").unwrap();
        assert_eq!(controller.state(), ConnectionState::Connecting);

        let err = controller.begin_connect("Phantom").unwrap_err();
        assert_eq!(err, SessionError::ConnectInFlight);

        controller
            .complete_connect(adapter.name(), Ok(WalletAddress("addr".to_owned())))
            .unwrap();
        assert_eq!(controller.state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn disconnect_is_idempotent_and_clears_storage() {
        let store = InMemoryStore::default();
        let mut controller = controller_with(
            vec![FakeAdapter::installed("Phantom", "addr123")],
            store.clone(),
        );
        controller.connect("Phantom").await.unwrap();

        controller.disconnect_and_hangup().await;
        assert_eq!(controller.state(), ConnectionState::Disconnected);
        assert_eq!(controller.session(), &WalletSession::default());
        assert!(store.is_empty());

        controller.disconnect_and_hangup().await;
        assert_eq!(controller.state(), ConnectionState::Disconnected);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn disconnect_invokes_extension_hangup_best_effort() {
        let adapter = FakeAdapter::installed("Phantom", "addr123");
        let disconnects = adapter.disconnects.clone();
        let mut controller = controller_with(vec![adapter], InMemoryStore::default());
        controller.connect("Phantom").await.unwrap();

        controller.disconnect_and_hangup().await;
        assert_eq!(disconnects.get(), 1);

        // Nothing connected, nothing to hang up.
        controller.disconnect_and_hangup().await;
        assert_eq!(disconnects.get(), 1);
    }

    #[tokio::test]
    async fn restore_round_trips_a_persisted_session() {
        let store = InMemoryStore::default();
        let mut first = controller_with(
            vec![FakeAdapter::installed("Phantom", "addr123")],
            store.clone(),
        );
        first.connect("Phantom").await.unwrap();

        let mut second = controller_with(
            vec![FakeAdapter::installed("Phantom", "addr123")],
            store.clone(),
        );
        second.restore();

        assert_eq!(second.state(), ConnectionState::Connected);
        assert_eq!(second.session(), first.session());
    }

    #[test]
    fn restore_drops_entry_for_uninstalled_adapter() {
        let store = InMemoryStore::default();
        store
            .save(&PersistedSession {
                address: "addr123".to_owned(),
                wallet_name: "MetaMask".to_owned(),
            })
            .unwrap();

        let mut controller =
            controller_with(vec![FakeAdapter::missing("MetaMask")], store.clone());
        controller.restore();

        assert_eq!(controller.state(), ConnectionState::Disconnected);
        assert!(store.is_empty());
    }

    #[test]
    fn restore_drops_entry_for_unknown_adapter() {
        let store = InMemoryStore::default();
        store
            .save(&PersistedSession {
                address: "addr123".to_owned(),
                wallet_name: "Ghost".to_owned(),
            })
            .unwrap();

        let mut controller = controller_with(
            vec![FakeAdapter::installed("Phantom", "addr123")],
            store.clone(),
        );
        controller.restore();

        assert_eq!(controller.state(), ConnectionState::Disconnected);
        assert!(store.is_empty());
    }

    /// Unreadable slot content stands in for malformed localStorage JSON.
    struct CorruptStore {
        cleared: Rc<Cell<bool>>,
    }

    impl SessionStore for CorruptStore {
        fn load(&self) -> anyhow::Result<Option<PersistedSession>> {
            Err(anyhow!("expected value at line 1 column 1"))
        }

        fn save(&self, _session: &PersistedSession) -> anyhow::Result<()> {
            Ok(())
        }

        fn clear(&self) -> anyhow::Result<()> {
            self.cleared.set(true);
            Ok(())
        }
    }

    #[test]
    fn restore_repairs_corrupt_entry_by_deletion() {
        let cleared = Rc::new(Cell::new(false));
        let store = CorruptStore {
            cleared: cleared.clone(),
        };
        let mut registry = AdapterRegistry::default();
        registry.register(Arc::new(FakeAdapter::installed("Phantom", "addr")));
        let mut controller = SessionController::new(registry, store);

        controller.restore();

        assert_eq!(controller.state(), ConnectionState::Disconnected);
        assert!(cleared.get());
    }
}
