//! Persisted client-side state.
//!
//! The browser's durable local store becomes a [`SessionStore`]: a flat
//! string key-value map. The file-backed implementation writes the whole map
//! on every mutation - these are a handful of small entries, and best-effort
//! durability is the contract (the pending-order snapshot is a recovery aid,
//! not a ledger).

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Keys for persisted state.
pub mod keys {
    /// Bearer token of the signed-in customer.
    pub const USER_TOKEN: &str = "user_token";

    /// Email of the signed-in customer.
    pub const USER_EMAIL: &str = "user_email";

    /// Cart snapshot, restored on the next visit.
    pub const CART: &str = "cart";

    /// Pending-order snapshot written just before the payment redirect.
    pub const PENDING_ORDER: &str = "pending_order";
}

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session encoding error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Flat string key-value store, the stand-in for browser local storage.
pub trait SessionStore: Send + Sync {
    /// Read a raw value.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Write a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn insert_raw(&mut self, key: &str, value: String) -> Result<(), SessionError>;

    /// Remove a key. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// Read and decode a JSON value from a store.
///
/// # Errors
///
/// Returns an error if the stored value does not decode as `T`.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: &str,
) -> Result<Option<T>, SessionError> {
    store
        .get_raw(key)
        .map(|raw| serde_json::from_str(&raw).map_err(SessionError::from))
        .transpose()
}

/// Encode and write a JSON value to a store.
///
/// # Errors
///
/// Returns an error if encoding or the backing storage fails.
pub fn insert_json<T: Serialize>(
    store: &mut dyn SessionStore,
    key: &str,
    value: &T,
) -> Result<(), SessionError> {
    let raw = serde_json::to_string(value)?;
    store.insert_raw(key, raw)
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn insert_raw(&mut self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object per session file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open a session file, creating the state lazily if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or decoded.
    pub fn open(path: PathBuf) -> Result<Self, SessionError> {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<(), SessionError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn insert_raw(&mut self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}
