//! Cache key derivation
//!
//! A fingerprint is the hex md5 digest of the statement text joined to the
//! canonical JSON serialization of the positional parameter sequence. The
//! cache key is the configured prefix followed by either a caller-supplied
//! explicit key or the fingerprint. Explicit keys bypass fingerprinting
//! entirely, which is what makes invalidation by key name possible.

use md5::{Digest, Md5};
use rowcache_core::{Result, Value};

/// Deterministic identity of a statement and its bound parameters
///
/// Stable across calls and processes for identical inputs; sensitive to the
/// statement text and to parameter values and order.
pub fn fingerprint(statement: &str, params: &[Value]) -> Result<String> {
    let serialized = serde_json::to_string(params)?;
    let mut hasher = Md5::new();
    hasher.update(statement.as_bytes());
    hasher.update(b":");
    hasher.update(serialized.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Derive the full cache key for a fetch call
///
/// An explicit key (non-empty) replaces the fingerprint; the statement and
/// parameters are not hashed at all in that case.
pub fn build_key(
    prefix: &str,
    statement: &str,
    params: &[Value],
    explicit: Option<&str>,
) -> Result<String> {
    match explicit {
        Some(key) if !key.is_empty() => Ok(format!("{}{}", prefix, key)),
        _ => Ok(format!("{}{}", prefix, fingerprint(statement, params)?)),
    }
}
