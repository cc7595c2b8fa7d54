use async_trait::async_trait;
use pk_types::WalletAddress;
use std::sync::Arc;
use thiserror::Error;

pub mod address;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("{0} wallet is not installed")]
    NotInstalled(String),
    /// Extension handshake rejected or threw. The extension's own error
    /// detail is deliberately not carried; callers only see which wallet
    /// failed.
    #[error("failed to connect to {0}")]
    ConnectionFailed(String),
    #[error("failed to disconnect from {0}")]
    DisconnectFailed(String),
}

/// Uniform contract for one browser wallet-extension kind.
///
/// Adapters are stateless capability descriptors: constructed once, shared by
/// reference, and safe to probe repeatedly. Futures are `?Send` because the
/// underlying extension handshakes run on the browser's single-threaded
/// event loop.
#[async_trait(?Send)]
pub trait WalletAdapter: std::fmt::Debug {
    /// Identifying name, unique per wallet kind (e.g. "Phantom").
    fn name(&self) -> &str;
    fn icon(&self) -> &str;
    fn install_url(&self) -> &str;
    /// Whether the extension's injected global is currently present.
    /// Must reflect the live browser state on every call.
    fn is_installed(&self) -> bool;
    /// Run the extension's connect handshake and return the account address.
    /// Fails with [`WalletError::NotInstalled`] when invoked without the
    /// extension present.
    async fn connect(&self) -> Result<WalletAddress, WalletError>;
    /// Extension-side hangup. Best-effort; MetaMask has no programmatic
    /// disconnect and implements this as a no-op, so the extension may stay
    /// connected even after the local session is cleared.
    async fn disconnect(&self) -> Result<(), WalletError>;
}

/// Fixed, ordered set of wallet adapters.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn WalletAdapter>>,
}

impl AdapterRegistry {
    pub fn register(&mut self, adapter: Arc<dyn WalletAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn all(&self) -> &[Arc<dyn WalletAdapter>] {
        &self.adapters
    }

    /// Adapters whose extension is present right now. Recomputed on every
    /// call: extensions can be injected after page load, so caching the
    /// result would go stale.
    pub fn installed(&self) -> Vec<Arc<dyn WalletAdapter>> {
        self.adapters
            .iter()
            .filter(|a| a.is_installed())
            .cloned()
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<Arc<dyn WalletAdapter>> {
        self.adapters.iter().find(|a| a.name() == name).cloned()
    }

    /// Like [`find`](Self::find), but only returns the adapter when its
    /// extension is installed.
    pub fn find_installed(&self, name: &str) -> Option<Arc<dyn WalletAdapter>> {
        self.adapters
            .iter()
            .find(|a| a.name() == name && a.is_installed())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeAdapter {
        name: &'static str,
        installed: bool,
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
            if !self.installed {
                return Err(WalletError::NotInstalled(self.name.to_owned()));
            }
            Ok(WalletAddress("addr".to_owned()))
        }

        async fn disconnect(&self) -> Result<(), WalletError> {
            Ok(())
        }
    }

    fn registry() -> AdapterRegistry {
        let mut registry = AdapterRegistry::default();
        registry.register(Arc::new(FakeAdapter {
            name: "Phantom",
            installed: true,
        }));
        registry.register(Arc::new(FakeAdapter {
            name: "MetaMask",
            installed: false,
        }));
        registry
    }

    #[test]
    fn installed_filters_missing_extensions() {
        let registry = registry();
        let installed = registry.installed();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].name(), "Phantom");
    }

    #[test]
    fn registry_preserves_registration_order() {
        let registry = registry();
        let names: Vec<&str> = registry.all().iter().map(|a| a.name()).collect();
        assert_eq!(names, ["Phantom", "MetaMask"]);
    }

    #[test]
    fn find_installed_rejects_uninstalled() {
        let registry = registry();
        assert!(registry.find("MetaMask").is_some());
        assert!(registry.find_installed("MetaMask").is_none());
        assert!(registry.find_installed("Phantom").is_some());
    }

    #[tokio::test]
    async fn connect_without_extension_is_not_installed() {
        let adapter = FakeAdapter {
            name: "MetaMask",
            installed: false,
        };
        let err = adapter.connect().await.unwrap_err();
        assert_eq!(err, WalletError::NotInstalled("MetaMask".to_owned()));
        assert_eq!(err.to_string(), "MetaMask wallet is not installed");
    }
}
