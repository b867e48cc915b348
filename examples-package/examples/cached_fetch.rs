//! Cached Fetch Example
//!
//! Demonstrates the query caching facade: fingerprinted keys, explicit keys
//! with deletion, TTL bypass, and row mapping strategies.

use anyhow::Result;
use rowcache::{
    CacheConfig, CachedFetcher, IntoRecord, MapRow, MemoryRowSource, MemoryStore, RawRows, Row,
    Ttl, Value,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: i64,
    name: String,
}

fn sample_rows() -> Vec<Row> {
    vec![
        Row::from_pairs(vec![
            ("id".to_string(), Value::Int(1)),
            ("name".to_string(), Value::Text("Alice".to_string())),
        ]),
        Row::from_pairs(vec![
            ("id".to_string(), Value::Int(2)),
            ("name".to_string(), Value::Text("Bob".to_string())),
        ]),
        Row::from_pairs(vec![
            ("id".to_string(), Value::Int(3)),
            ("name".to_string(), Value::Text("Charlie".to_string())),
        ]),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Cached Fetch Example ===\n");

    basic_caching().await?;
    explicit_keys().await?;
    ttl_bypass().await?;
    row_mapping().await?;

    println!("\n=== All examples completed! ===");
    Ok(())
}

/// Example 1: Miss then hit with a fingerprinted key
async fn basic_caching() -> Result<()> {
    println!("--- Example 1: Basic Caching ---\n");

    let store = Arc::new(MemoryStore::with_defaults());
    let source = Arc::new(MemoryRowSource::with_rows(sample_rows()));
    let fetcher = CachedFetcher::new(store, source.clone(), CacheConfig::new("demo:"));

    let stmt = "SELECT id, name FROM users WHERE active = ?";
    let params = [Value::Bool(true)];

    println!("Fetching: {}", stmt);
    let first = fetcher
        .fetch_all(stmt, &params, &RawRows, Ttl::seconds(60), None)
        .await?;
    println!("First call: {} rows, {} execution(s)", first.len(), source.executions());

    let second = fetcher
        .fetch_all(stmt, &params, &RawRows, Ttl::seconds(60), None)
        .await?;
    println!(
        "Second call: {} rows, still {} execution(s) (cache HIT)",
        second.len(),
        source.executions()
    );

    println!("Derived key: {}", fetcher.cache_key(stmt, &params, None)?);

    let stats = fetcher.stats();
    println!(
        "Stats: {} hit(s), {} miss(es), hit rate {:.0}%\n",
        stats.hits(),
        stats.misses(),
        stats.hit_rate() * 100.0
    );

    Ok(())
}

/// Example 2: Explicit keys and deletion
async fn explicit_keys() -> Result<()> {
    println!("--- Example 2: Explicit Keys ---\n");

    let store = Arc::new(MemoryStore::with_defaults());
    let source = Arc::new(MemoryRowSource::with_rows(sample_rows()));
    let fetcher = CachedFetcher::new(store, source.clone(), CacheConfig::new("demo:"));

    let stmt = "SELECT id, name FROM users";

    fetcher
        .fetch_all(stmt, &[], &RawRows, Ttl::seconds(300), Some("all-users"))
        .await?;
    println!("Cached under explicit key \"all-users\"");

    fetcher
        .fetch_all(stmt, &[], &RawRows, Ttl::seconds(300), Some("all-users"))
        .await?;
    println!("Replayed from cache ({} execution(s))", source.executions());

    fetcher.delete_key("all-users").await?;
    println!("Deleted \"all-users\"");

    fetcher
        .fetch_all(stmt, &[], &RawRows, Ttl::seconds(300), Some("all-users"))
        .await?;
    println!("Next fetch re-executed ({} execution(s))\n", source.executions());

    Ok(())
}

/// Example 3: The disabled TTL bypasses the cache entirely
async fn ttl_bypass() -> Result<()> {
    println!("--- Example 3: TTL Bypass ---\n");

    let store = Arc::new(MemoryStore::with_defaults());
    let source = Arc::new(MemoryRowSource::with_rows(sample_rows()));
    let fetcher = CachedFetcher::new(store, source.clone(), CacheConfig::new("demo:"));

    let stmt = "SELECT id, name FROM users";

    for _ in 0..3 {
        fetcher
            .fetch_all(stmt, &[], &RawRows, Ttl::DISABLED, None)
            .await?;
    }
    println!(
        "3 fetches with Ttl::DISABLED: {} executions, {} bypass(es), 0 store reads",
        source.executions(),
        fetcher.stats().bypasses()
    );

    let one = fetcher
        .fetch_one(stmt, &[], &RawRows, Ttl::DISABLED, None)
        .await?;
    println!(
        "fetch_one (bounded to 1 row): {:?}\n",
        one.and_then(|r| r.get("name").cloned())
    );

    Ok(())
}

/// Example 4: Typed records and transforms
async fn row_mapping() -> Result<()> {
    println!("--- Example 4: Row Mapping ---\n");

    let store = Arc::new(MemoryStore::with_defaults());
    let source = Arc::new(MemoryRowSource::with_rows(sample_rows()));
    let fetcher = CachedFetcher::new(store, source, CacheConfig::new("demo:"));

    let stmt = "SELECT id, name FROM users";

    // Typed records populated by column name
    let users: Vec<User> = fetcher
        .fetch_all(stmt, &[], &IntoRecord::<User>::new(), Ttl::seconds(60), None)
        .await?;
    println!("Typed records: {:?}", users);

    // Caller-supplied transform; the domain is a closure capture. A different
    // statement text, since the mapper's output shape is not part of the key.
    let domain = "example.com".to_string();
    let emails = fetcher
        .fetch_all(
            "SELECT id, name FROM users ORDER BY id",
            &[],
            &MapRow::new(move |row: &Row| {
                let name = row.require("name")?.as_text().unwrap_or("").to_lowercase();
                Ok(format!("{}@{}", name, domain))
            }),
            Ttl::seconds(60),
            None,
        )
        .await?;
    println!("Transformed: {:?}", emails);

    Ok(())
}
