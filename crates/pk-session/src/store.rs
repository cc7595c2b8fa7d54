//! Durable session storage seam.
//!
//! One logical slot holding the last connected `{address, walletName}` pair.
//! The browser frontend backs this with localStorage; tests use the
//! in-memory implementation.

use anyhow::{Result, anyhow};
use pk_types::PersistedSession;
use std::sync::{Arc, Mutex};

pub trait SessionStore {
    /// Read the persisted session. A load error means the slot content is
    /// unusable (e.g. malformed JSON); callers repair by clearing it.
    fn load(&self) -> Result<Option<PersistedSession>>;
    fn save(&self, session: &PersistedSession) -> Result<()>;
    /// Remove the persisted session. Clearing an empty slot is a no-op.
    fn clear(&self) -> Result<()>;
}

#[derive(Default)]
pub struct NoopStore;

impl SessionStore for NoopStore {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(None)
    }

    fn save(&self, _session: &PersistedSession) -> Result<()> {
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        Ok(())
    }
}

/// Clones share the same slot, so a rehydrating controller can observe what
/// an earlier one persisted.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    entry: Arc<Mutex<Option<PersistedSession>>>,
}

impl InMemoryStore {
    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<PersistedSession>>> {
        self.entry.lock().map_err(|_| anyhow!("session store poisoned"))
    }

    pub fn is_empty(&self) -> bool {
        self.slot().map(|s| s.is_none()).unwrap_or(true)
    }
}

impl SessionStore for InMemoryStore {
    fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}
