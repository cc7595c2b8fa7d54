//! localStorage-backed session store.

use anyhow::{Context, Result, anyhow};
use pk_session::SessionStore;
use pk_types::PersistedSession;

/// Single fixed key holding the persisted `{address, walletName}` JSON.
pub const STORAGE_KEY: &str = "wallet_connection";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[derive(Default, Clone)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Result<Option<PersistedSession>> {
        let Some(storage) = storage() else {
            return Ok(None);
        };
        let Some(raw) = storage.get_item(STORAGE_KEY).ok().flatten() else {
            return Ok(None);
        };
        let parsed = serde_json::from_str(&raw).context("malformed wallet session")?;
        Ok(Some(parsed))
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        let storage = storage().ok_or_else(|| anyhow!("localStorage unavailable"))?;
        let raw = serde_json::to_string(session)?;
        storage
            .set_item(STORAGE_KEY, &raw)
            .map_err(|err| anyhow!("localStorage write failed: {err:?}"))
    }

    fn clear(&self) -> Result<()> {
        let Some(storage) = storage() else {
            return Ok(());
        };
        storage
            .remove_item(STORAGE_KEY)
            .map_err(|err| anyhow!("localStorage delete failed: {err:?}"))
    }
}
