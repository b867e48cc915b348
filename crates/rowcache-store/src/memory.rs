//! Bounded in-memory cache store
//!
//! LRU-bounded store with per-entry TTL expiration. Expired entries are
//! removed lazily on read.

use crate::store::CacheStore;
use async_trait::async_trait;
use lru::LruCache;
use parking_lot::RwLock;
use rowcache_core::Result;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Entry held by the memory store
#[derive(Debug, Clone)]
struct StoreEntry {
    value: Vec<u8>,
    /// `None` means the entry never expires
    expires_at: Option<Instant>,
}

impl StoreEntry {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

/// In-memory key-value store with LRU bounding and per-entry TTL
pub struct MemoryStore {
    entries: RwLock<LruCache<String, StoreEntry>>,
}

impl MemoryStore {
    /// Create a store holding at most `max_entries` values
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Create a store with the default capacity of 1000 entries
    pub fn with_defaults() -> Self {
        Self::new(1000)
    }

    /// Current number of entries, including not-yet-collected expired ones
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    #[cfg(test)]
    fn insert_raw(&self, key: &str, value: Vec<u8>, expires_at: Option<Instant>) {
        self.entries
            .write()
            .push(key.to_string(), StoreEntry { value, expires_at });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write();

        let live = match entries.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            Some(_) => None,
            None => return Ok(None),
        };

        // Expired entries are collected here, on the read path.
        if live.is_none() {
            entries.pop(key);
        }
        Ok(live)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()> {
        let expires_at = if ttl_secs == 0 {
            None
        } else {
            Some(Instant::now() + Duration::from_secs(ttl_secs))
        };
        self.entries
            .write()
            .push(key.to_string(), StoreEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().pop(key);
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_round_trip() {
        let store = MemoryStore::with_defaults();

        store.set("k1", b"payload".to_vec(), 60).await.unwrap();

        let value = store.get("k1").await.unwrap();
        assert_eq!(value, Some(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn test_get_absent() {
        let store = MemoryStore::with_defaults();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::with_defaults();

        store.set("k1", b"v".to_vec(), 60).await.unwrap();
        store.delete("k1").await.unwrap();

        assert_eq!(store.get("k1").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let store = MemoryStore::with_defaults();

        store.set("k1", b"old".to_vec(), 60).await.unwrap();
        store.set("k1", b"new".to_vec(), 60).await.unwrap();

        assert_eq!(store.get("k1").await.unwrap(), Some(b"new".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_never_expires() {
        let store = MemoryStore::with_defaults();

        store.set("k1", b"v".to_vec(), 0).await.unwrap();

        assert_eq!(store.get("k1").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed_on_read() {
        let store = MemoryStore::with_defaults();
        store.insert_raw(
            "stale",
            b"v".to_vec(),
            Some(Instant::now() - Duration::from_secs(1)),
        );
        assert_eq!(store.len(), 1);

        assert_eq!(store.get("stale").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_lru_bounding() {
        let store = MemoryStore::new(2);

        store.set("a", b"1".to_vec(), 60).await.unwrap();
        store.set("b", b"2".to_vec(), 60).await.unwrap();
        store.set("c", b"3".to_vec(), 60).await.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").await.unwrap(), None);
        assert!(store.get("c").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryStore::with_defaults();

        store.set("a", b"1".to_vec(), 60).await.unwrap();
        store.set("b", b"2".to_vec(), 60).await.unwrap();
        store.clear();

        assert!(store.is_empty());
    }
}
