//! Cache store contract and in-memory backend
//!
//! A [`CacheStore`] is an external key-value store holding serialized result
//! sets under string keys, with per-entry TTL support. The coordinator owns
//! key derivation and serialization; the store only moves opaque bytes.
//!
//! [`MemoryStore`] is the bounded in-memory implementation used as the
//! default and testing backend. Production backends (Redis, memcached, ...)
//! are host concerns and implement the same trait.

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::CacheStore;
