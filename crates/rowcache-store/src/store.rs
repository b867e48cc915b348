//! The cache store contract

use async_trait::async_trait;
use rowcache_core::Result;

/// External key-value store for serialized result sets
///
/// Implementations must round-trip values byte-identically: the bytes passed
/// to [`set`](CacheStore::set) are exactly the bytes returned by a later
/// [`get`](CacheStore::get) for the same key, until the entry expires or is
/// deleted. Failures are reported loudly as errors, never as silent
/// corruption.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up the value stored under `key`, or `None` when absent
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key` with a lifetime of `ttl_secs` seconds
    ///
    /// A lifetime of zero means the entry does not expire.
    async fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()>;

    /// Remove the entry stored under `key`, if any
    async fn delete(&self, key: &str) -> Result<()>;
}
