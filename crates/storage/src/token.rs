//! Token persistence
//!
//! The session token lives in a single durable entry. Access goes through
//! [`TokenStore`] so the session layer can run against sled, memory, or a
//! test double.

use crate::kv::{KvStore, Result};
use parking_lot::Mutex;

/// Key under which the session token is stored
pub const TOKEN_KEY: &str = "token";

/// Storage for the current session token
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Store `token`, replacing any previous value
    fn save(&self, token: &str) -> Result<()>;

    /// Delete the stored token
    fn clear(&self) -> Result<()>;
}

/// [`TokenStore`] backed by the durable key-value store
#[derive(Clone)]
pub struct KvTokenStore {
    kv: KvStore,
}

impl KvTokenStore {
    /// Create a token store over `kv`
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }
}

impl TokenStore for KvTokenStore {
    fn load(&self) -> Result<Option<String>> {
        self.kv.get_string(TOKEN_KEY)
    }

    fn save(&self, token: &str) -> Result<()> {
        self.kv.set_string(TOKEN_KEY, token)?;
        self.kv.flush()
    }

    fn clear(&self) -> Result<()> {
        self.kv.remove(TOKEN_KEY)?;
        self.kv.flush()
    }
}

/// In-process [`TokenStore`]; contents are lost when dropped
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock() = None;
        Ok(())
    }
}
