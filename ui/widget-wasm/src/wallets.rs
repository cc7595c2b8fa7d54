//! Browser wallet adapters.
//!
//! Each adapter probes the extension's injected global on `window` and
//! delegates connect/disconnect to the extension's own handshake. Extension
//! error detail is collapsed to a generic connection failure; only the
//! wallet name reaches the UI.

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use pk_types::WalletAddress;
use pk_wallet::{AdapterRegistry, WalletAdapter, WalletError};
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

pub const PHANTOM: &str = "Phantom";
pub const METAMASK: &str = "MetaMask";

/// Registry with the fixed adapter set, in display order.
pub fn default_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::default();
    registry.register(Arc::new(PhantomAdapter));
    registry.register(Arc::new(MetaMaskAdapter));
    registry
}

fn injected_global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(value)
}

fn has_marker(provider: &JsValue, marker: &str) -> bool {
    Reflect::get(provider, &JsValue::from_str(marker))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Invoke a zero-argument method on the provider and await the returned
/// promise.
async fn call_provider(provider: &JsValue, method: &str) -> Result<JsValue, JsValue> {
    let func: Function = Reflect::get(provider, &JsValue::from_str(method))?.dyn_into()?;
    let promise: Promise = func.call0(provider)?.dyn_into()?;
    JsFuture::from(promise).await
}

// ── Phantom (Solana) ──

#[derive(Debug)]
pub struct PhantomAdapter;

impl PhantomAdapter {
    fn provider() -> Option<JsValue> {
        injected_global("solana").filter(|p| has_marker(p, "isPhantom"))
    }
}

#[async_trait(?Send)]
impl WalletAdapter for PhantomAdapter {
    fn name(&self) -> &str {
        PHANTOM
    }

    fn icon(&self) -> &str {
        "\u{1F47B}"
    }

    fn install_url(&self) -> &str {
        "https://phantom.app/"
    }

    fn is_installed(&self) -> bool {
        Self::provider().is_some()
    }

    async fn connect(&self) -> Result<WalletAddress, WalletError> {
        let Some(provider) = Self::provider() else {
            return Err(WalletError::NotInstalled(PHANTOM.to_owned()));
        };

        let response = call_provider(&provider, "connect")
            .await
            .map_err(|_| WalletError::ConnectionFailed(PHANTOM.to_owned()))?;

        // response.publicKey.toString()
        let address = Reflect::get(&response, &JsValue::from_str("publicKey"))
            .ok()
            .and_then(|k| k.dyn_into::<Object>().ok())
            .map(|k| String::from(k.to_string()))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| WalletError::ConnectionFailed(PHANTOM.to_owned()))?;

        Ok(WalletAddress(address))
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        let Some(provider) = Self::provider() else {
            return Ok(());
        };
        call_provider(&provider, "disconnect")
            .await
            .map(|_| ())
            .map_err(|_| WalletError::DisconnectFailed(PHANTOM.to_owned()))
    }
}

// ── MetaMask (Ethereum) ──

#[derive(Debug)]
pub struct MetaMaskAdapter;

impl MetaMaskAdapter {
    /// Requires the `isMetaMask` marker: other extensions inject the same
    /// `ethereum` global.
    fn provider() -> Option<JsValue> {
        injected_global("ethereum").filter(|p| has_marker(p, "isMetaMask"))
    }

    async fn request_accounts(provider: &JsValue) -> Result<JsValue, JsValue> {
        let args = Object::new();
        Reflect::set(
            &args,
            &JsValue::from_str("method"),
            &JsValue::from_str("eth_requestAccounts"),
        )?;
        let func: Function =
            Reflect::get(provider, &JsValue::from_str("request"))?.dyn_into()?;
        let promise: Promise = func.call1(provider, &args)?.dyn_into()?;
        JsFuture::from(promise).await
    }
}

#[async_trait(?Send)]
impl WalletAdapter for MetaMaskAdapter {
    fn name(&self) -> &str {
        METAMASK
    }

    fn icon(&self) -> &str {
        "\u{1F98A}"
    }

    fn install_url(&self) -> &str {
        "https://metamask.io/"
    }

    fn is_installed(&self) -> bool {
        Self::provider().is_some()
    }

    async fn connect(&self) -> Result<WalletAddress, WalletError> {
        let Some(provider) = Self::provider() else {
            return Err(WalletError::NotInstalled(METAMASK.to_owned()));
        };

        let accounts = Self::request_accounts(&provider)
            .await
            .map_err(|_| WalletError::ConnectionFailed(METAMASK.to_owned()))?;

        let address = js_sys::Array::from(&accounts)
            .get(0)
            .as_string()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| WalletError::ConnectionFailed(METAMASK.to_owned()))?;

        Ok(WalletAddress(address))
    }

    /// MetaMask has no programmatic disconnect; users detach from the
    /// extension itself. Local session state is still cleared by the caller.
    async fn disconnect(&self) -> Result<(), WalletError> {
        Ok(())
    }
}
