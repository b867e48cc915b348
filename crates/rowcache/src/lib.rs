//! Query-result caching facade
//!
//! This crate provides a caching facade placed in front of a relational
//! database client. A [`CachedFetcher`] executes a parameterized statement
//! through a [`RowSource`], maps each result row into an application shape,
//! and memoizes the materialized result set in a [`CacheStore`] under a key
//! derived from the statement and its bound parameters.
//!
//! # Features
//!
//! - **Fingerprinted keys**: deterministic statement + parameter hashing,
//!   with explicit-key overrides for manual invalidation
//! - **Per-call TTL**: a disabled sentinel bypasses the cache entirely
//! - **Row mapping strategies**: raw rows, typed records, or caller-supplied
//!   transforms
//! - **Statistics**: hits, misses, bypasses, stores, and deletions
//!
//! # Example
//!
//! ```ignore
//! use rowcache::{CacheConfig, CachedFetcher, RawRows, Ttl, Value};
//! use std::sync::Arc;
//!
//! let fetcher = CachedFetcher::new(store, source, CacheConfig::new("app:"));
//!
//! // First call executes and caches; second call replays the stored rows.
//! let rows = fetcher
//!     .fetch_all("SELECT * FROM users WHERE id = ?", &[Value::Int(1)],
//!                &RawRows, Ttl::seconds(60), None)
//!     .await?;
//! ```

pub mod config;
pub mod fetcher;
pub mod key;
pub mod stats;

pub use config::CacheConfig;
pub use fetcher::CachedFetcher;
pub use key::{build_key, fingerprint};
pub use stats::CacheStats;

pub use rowcache_core::{QueryError, Result, Row, Ttl, Value};
pub use rowcache_source::{IntoRecord, MapRecord, MapRow, MemoryRowSource, RawRows, RowMapper, RowSource};
pub use rowcache_store::{CacheStore, MemoryStore};
