//! Cached query fetcher
//!
//! Sits between a caller and two collaborators: a [`RowSource`] that executes
//! statements and a [`CacheStore`] that memoizes materialized result sets.
//! Each fetch derives a cache key, consults the store, and either replays the
//! stored sequence or executes the statement and populates the store.

use crate::config::CacheConfig;
use crate::key;
use crate::stats::CacheStats;
use rowcache_core::{Result, Ttl, Value};
use rowcache_source::{RowMapper, RowSource};
use rowcache_store::CacheStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of consulting the cache for one fetch call
enum CachePlan<T> {
    /// Caching is off for this call: execute, touch nothing
    Bypass,
    /// The stored sequence, replayed without executing
    Hit(Vec<T>),
    /// Absent: execute and populate under this key
    Miss { cache_key: String },
}

/// Query cache coordinator
///
/// Constructed once and reused across calls; holds no per-call mutable
/// state, so `&self` methods are safe from any number of concurrent tasks.
/// There is no single-flight de-duplication: concurrent misses on the same
/// key each execute and the last write wins.
pub struct CachedFetcher {
    store: Arc<dyn CacheStore>,
    source: Arc<dyn RowSource>,
    config: CacheConfig,
    stats: Arc<CacheStats>,
}

impl CachedFetcher {
    /// Create a fetcher over the given collaborators
    pub fn new(store: Arc<dyn CacheStore>, source: Arc<dyn RowSource>, config: CacheConfig) -> Self {
        Self {
            store,
            source,
            config,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Create a fetcher with the default configuration
    pub fn with_defaults(store: Arc<dyn CacheStore>, source: Arc<dyn RowSource>) -> Self {
        Self::new(store, source, CacheConfig::default())
    }

    /// Fetch every row the statement produces, mapped through `mapper`
    ///
    /// With caching enabled and a real TTL, a hit replays the stored sequence
    /// without touching the row source; a miss executes once, stores the
    /// materialized sequence under the derived key with the given TTL, and
    /// returns it. A disabled TTL executes unconditionally and never touches
    /// the store. `explicit_key` replaces the statement/parameter fingerprint
    /// in the cache key when given.
    pub async fn fetch_all<M: RowMapper>(
        &self,
        statement: &str,
        params: &[Value],
        mapper: &M,
        ttl: Ttl,
        explicit_key: Option<&str>,
    ) -> Result<Vec<M::Output>> {
        match self.consult_cache(statement, params, ttl, explicit_key).await? {
            CachePlan::Hit(rows) => Ok(rows),
            CachePlan::Bypass => self.execute(statement, params, mapper, None).await,
            CachePlan::Miss { cache_key } => {
                let rows = self.execute(statement, params, mapper, None).await?;
                self.populate(&cache_key, &rows, ttl).await?;
                Ok(rows)
            }
        }
    }

    /// Fetch the first row the statement produces, or `None` if there is none
    ///
    /// Same decision logic as [`fetch_all`](Self::fetch_all), with row
    /// production bounded to a single row on the execution path. A hit
    /// returns the first element of the stored sequence.
    pub async fn fetch_one<M: RowMapper>(
        &self,
        statement: &str,
        params: &[Value],
        mapper: &M,
        ttl: Ttl,
        explicit_key: Option<&str>,
    ) -> Result<Option<M::Output>> {
        match self.consult_cache(statement, params, ttl, explicit_key).await? {
            CachePlan::Hit(rows) => Ok(rows.into_iter().next()),
            CachePlan::Bypass => {
                let rows = self.execute(statement, params, mapper, Some(1)).await?;
                Ok(rows.into_iter().next())
            }
            CachePlan::Miss { cache_key } => {
                let rows = self.execute(statement, params, mapper, Some(1)).await?;
                self.populate(&cache_key, &rows, ttl).await?;
                Ok(rows.into_iter().next())
            }
        }
    }

    /// Delete the cache entry stored under an explicit key
    ///
    /// The sole invalidation primitive. The full key is the configured prefix
    /// followed by `explicit_key`; fingerprinted entries can only be deleted
    /// by a caller who recorded (or re-derives) the computed key.
    pub async fn delete_key(&self, explicit_key: &str) -> Result<()> {
        let cache_key = key::build_key(&self.config.key_prefix, "", &[], Some(explicit_key))?;
        debug!("Deleting cache entry {}", cache_key);
        self.store.delete(&cache_key).await?;
        self.stats.record_delete();
        Ok(())
    }

    /// The cache key a fetch with these arguments would use
    ///
    /// Exposed so callers can record fingerprinted keys for later deletion.
    pub fn cache_key(
        &self,
        statement: &str,
        params: &[Value],
        explicit_key: Option<&str>,
    ) -> Result<String> {
        key::build_key(&self.config.key_prefix, statement, params, explicit_key)
    }

    /// Get fetch statistics
    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Check if caching is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get the facade configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Decide whether this call bypasses, hits, or misses the cache
    async fn consult_cache<T: DeserializeOwned>(
        &self,
        statement: &str,
        params: &[Value],
        ttl: Ttl,
        explicit_key: Option<&str>,
    ) -> Result<CachePlan<T>> {
        if !self.config.enabled || ttl.is_disabled() {
            self.stats.record_bypass();
            return Ok(CachePlan::Bypass);
        }

        let cache_key = key::build_key(&self.config.key_prefix, statement, params, explicit_key)?;
        match self.store.get(&cache_key).await? {
            Some(bytes) => {
                self.stats.record_hit();
                debug!("Cache hit for {}", cache_key);
                Ok(CachePlan::Hit(decode_rows(&bytes)))
            }
            None => {
                self.stats.record_miss();
                debug!("Cache miss for {}", cache_key);
                Ok(CachePlan::Miss { cache_key })
            }
        }
    }

    /// Execute the statement and materialize mapped rows in production order
    async fn execute<M: RowMapper>(
        &self,
        statement: &str,
        params: &[Value],
        mapper: &M,
        max_rows: Option<usize>,
    ) -> Result<Vec<M::Output>> {
        let raw = self.source.query(statement, params, max_rows).await?;
        raw.into_iter().map(|row| mapper.map_row(row)).collect()
    }

    /// Write a materialized sequence to the store when the TTL is real
    async fn populate<T: Serialize>(&self, cache_key: &str, rows: &[T], ttl: Ttl) -> Result<()> {
        if let Some(ttl_secs) = ttl.as_secs() {
            let bytes = serde_json::to_vec(rows)?;
            self.store.set(cache_key, bytes, ttl_secs).await?;
            self.stats.record_store();
            debug!("Cached {} rows under {} ({}s)", rows.len(), cache_key, ttl_secs);
        }
        Ok(())
    }
}

impl std::fmt::Debug for CachedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedFetcher")
            .field("enabled", &self.config.enabled)
            .field("key_prefix", &self.config.key_prefix)
            .finish()
    }
}

/// Decode a stored sequence, coercing anything malformed to empty
fn decode_rows<T: DeserializeOwned>(bytes: &[u8]) -> Vec<T> {
    match serde_json::from_slice(bytes) {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Cached value is not a row sequence ({}), treating as empty", e);
            Vec::new()
        }
    }
}
