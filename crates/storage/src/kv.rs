//! Durable key-value store
//!
//! A thin wrapper over sled holding plain UTF-8 string values. The client
//! keeps a single entry here (the session token), but the store itself is
//! key-agnostic.

use sled::Db;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Key-value store error types
#[derive(Debug, Error)]
pub enum KvError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored bytes are not valid UTF-8
    #[error("Invalid UTF-8 value for key {key}: {source}")]
    InvalidUtf8 {
        /// Key whose value failed to decode
        key: String,
        /// Decoding error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Result type for key-value operations
pub type Result<T> = std::result::Result<T, KvError>;

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database directory
    pub path: PathBuf,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Flush interval in milliseconds (None disables background flushing)
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("smartcampus_kv.db"),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            flush_every_ms: Some(500),
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Key-value store implementation
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Db>,
}

impl KvStore {
    /// Open (or create) a store with configuration
    pub fn new(config: KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .flush_every_ms(config.flush_every_ms)
            .open()?;

        tracing::debug!("Opened key-value store at {}", config.path.display());

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory key-value store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get a string value by key
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|source| KvError::InvalidUtf8 { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    /// Set a string value by key
    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.db.insert(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    /// Remove a value by key, returning whether it existed
    pub fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.db.remove(key.as_bytes())?.is_some())
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.db.contains_key(key.as_bytes())?)
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the number of keys in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(KvError::InvalidKey("key must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_kv_store_creation() {
        let kv = KvStore::in_memory().unwrap();
        assert!(kv.is_empty());
    }

    #[test]
    fn test_set_and_get_string() {
        let kv = KvStore::in_memory().unwrap();

        kv.set_string("token", "abc.def.ghi").unwrap();

        assert_eq!(kv.get_string("token").unwrap(), Some("abc.def.ghi".to_string()));
        assert_eq!(kv.len(), 1);
    }

    #[test]
    fn test_value_is_stored_as_plain_bytes() {
        let kv = KvStore::in_memory().unwrap();
        kv.set_string("token", "plain").unwrap();

        let raw = kv.db.get(b"token").unwrap().unwrap();
        assert_eq!(&raw[..], b"plain");
    }

    #[test]
    fn test_get_nonexistent() {
        let kv = KvStore::in_memory().unwrap();
        assert_eq!(kv.get_string("missing").unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let kv = KvStore::in_memory().unwrap();
        kv.set_string("token", "value").unwrap();

        assert!(kv.remove("token").unwrap());
        assert!(!kv.remove("token").unwrap());
        assert!(!kv.contains("token").unwrap());
    }

    #[test]
    fn test_empty_key_rejected() {
        let kv = KvStore::in_memory().unwrap();
        let result = kv.set_string("", "value");
        assert!(matches!(result, Err(KvError::InvalidKey(_))));
    }

    #[test]
    fn test_invalid_utf8_value() {
        let kv = KvStore::in_memory().unwrap();
        kv.db.insert(b"bad", vec![0xff, 0xfe]).unwrap();

        let result = kv.get_string("bad");
        assert!(matches!(result, Err(KvError::InvalidUtf8 { .. })));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kv");

        {
            let kv = KvStore::new(KvConfig::new(&path).flush_every_ms(None)).unwrap();
            kv.set_string("token", "persisted").unwrap();
            kv.flush().unwrap();
        }

        let kv = KvStore::new(KvConfig::new(&path).flush_every_ms(None)).unwrap();
        assert_eq!(kv.get_string("token").unwrap(), Some("persisted".to_string()));
    }

    #[test]
    fn test_config_builder() {
        let config = KvConfig::new("/tmp/campus").cache_capacity(1024).flush_every_ms(None);

        assert_eq!(config.path, PathBuf::from("/tmp/campus"));
        assert_eq!(config.cache_capacity, 1024);
        assert_eq!(config.flush_every_ms, None);
    }
}
