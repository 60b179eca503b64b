//! Pluggable storage behind the session client.
//!
//! The client never reaches for ambient storage on its own; it is handed a
//! [`SessionStore`] at construction. Desktop hosts hand it a [`DiskStore`],
//! tests and ephemeral hosts a [`MemoryStore`], and embedders with their own
//! persistence implement the trait themselves.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};

/// Durable string slots keyed by name.
///
/// Implementations must tolerate concurrent calls; the session client is
/// `Clone` and may be driven from several tasks at once.
pub trait SessionStore: Send + Sync {
    /// Read the value under `key`, `None` when the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the slot under `key`. Removing an absent slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-per-key store rooted at a directory; each key lives in `<key>.json`.
pub struct DiskStore {
    store_dir: PathBuf,
}

impl DiskStore {
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
        }
    }

    /// Store rooted at the platform config directory for `app_name`.
    pub fn for_app(app_name: &str) -> Result<Self> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(Self::new(base.join(app_name)))
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.store_dir.join(format!("{}.json", key))
    }
}

impl SessionStore for DiskStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store entry: {}", key))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.store_dir)?;
        std::fs::write(self.entry_path(key), value)
            .with_context(|| format!("Failed to write store entry: {}", key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove store entry: {}", key))?;
        }
        Ok(())
    }
}

/// In-memory store for tests and hosts without a filesystem.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
