//! Saved-host store — names, addresses, and last-browsed paths.
//!
//! A single JSON file under the platform data directory (overridable with
//! `HOOKSHOT_DATA_DIR`). Small enough to load and rewrite whole; writes go
//! through a temp file and rename so a crash mid-save never leaves a
//! truncated store behind.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving the host store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access host store: {0}")]
    Io(#[from] io::Error),

    #[error("host store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// One saved host entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedHost {
    /// User-chosen short name.
    pub name: String,
    /// `host:port` address of the agent.
    pub address: String,
    /// The directory the user last browsed on this host, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_browsed: Option<String>,
}

/// The on-disk host list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostStore {
    pub hosts: Vec<SavedHost>,
}

impl HostStore {
    /// `$HOOKSHOT_DATA_DIR/hosts.json`, or `hosts.json` under the
    /// platform data dir (`~/.local/share/hookshot` on Linux).
    pub fn path() -> PathBuf {
        let dir = std::env::var_os("HOOKSHOT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(std::env::temp_dir)
                    .join("hookshot")
            });
        dir.join("hosts.json")
    }

    /// Load the store; a missing file is an empty store.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self, StoreError> {
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the store atomically.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SavedHost> {
        self.hosts.iter().find(|h| h.name == name)
    }

    /// Add or replace the entry named `name`.
    pub fn upsert(&mut self, name: impl Into<String>, address: impl Into<String>) {
        let name = name.into();
        let address = address.into();
        match self.hosts.iter_mut().find(|h| h.name == name) {
            Some(host) => host.address = address,
            None => self.hosts.push(SavedHost {
                name,
                address,
                last_browsed: None,
            }),
        }
    }

    /// Remove the entry named `name`; `true` if something was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.hosts.len();
        self.hosts.retain(|h| h.name != name);
        self.hosts.len() != before
    }

    /// Record the directory last browsed on a saved host.
    pub fn set_last_browsed(&mut self, name: &str, path: impl Into<String>) {
        if let Some(host) = self.hosts.iter_mut().find(|h| h.name == name) {
            host.last_browsed = Some(path.into());
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
