//! In-memory fixture source
//!
//! Returns a preloaded set of rows for any statement. Used by demos and
//! tests; a real deployment implements [`RowSource`] on top of its database
//! client.

use crate::source::RowSource;
use async_trait::async_trait;
use rowcache_core::{Result, Row, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Row source backed by a fixed in-memory row set
///
/// Every statement produces the same configured rows, bounded by `max_rows`.
/// Executions are counted so callers can observe whether the source was
/// actually invoked.
#[derive(Debug, Default)]
pub struct MemoryRowSource {
    rows: Vec<Row>,
    executions: AtomicU64,
}

impl MemoryRowSource {
    /// Create a source producing no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source producing the given rows, in order
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            executions: AtomicU64::new(0),
        }
    }

    /// Number of times the source has been executed
    pub fn executions(&self) -> u64 {
        self.executions.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RowSource for MemoryRowSource {
    async fn query(
        &self,
        _statement: &str,
        _params: &[Value],
        max_rows: Option<usize>,
    ) -> Result<Vec<Row>> {
        self.executions.fetch_add(1, Ordering::Relaxed);
        let limit = max_rows.unwrap_or(self.rows.len());
        Ok(self.rows.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        (1..=3)
            .map(|i| Row::from_pairs(vec![("id".to_string(), Value::Int(i))]))
            .collect()
    }

    #[tokio::test]
    async fn test_produces_rows_in_order() {
        let source = MemoryRowSource::with_rows(rows());

        let produced = source.query("SELECT * FROM t", &[], None).await.unwrap();

        assert_eq!(produced.len(), 3);
        assert_eq!(produced[0].get("id"), Some(&Value::Int(1)));
        assert_eq!(produced[2].get("id"), Some(&Value::Int(3)));
    }

    #[tokio::test]
    async fn test_max_rows_bounds_production() {
        let source = MemoryRowSource::with_rows(rows());

        let produced = source
            .query("SELECT * FROM t", &[], Some(1))
            .await
            .unwrap();

        assert_eq!(produced.len(), 1);
        assert_eq!(produced[0].get("id"), Some(&Value::Int(1)));
    }

    #[tokio::test]
    async fn test_execution_count() {
        let source = MemoryRowSource::with_rows(rows());
        assert_eq!(source.executions(), 0);

        source.query("SELECT 1", &[], None).await.unwrap();
        source.query("SELECT 2", &[], None).await.unwrap();

        assert_eq!(source.executions(), 2);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let source = MemoryRowSource::new();
        let produced = source.query("SELECT * FROM t", &[], None).await.unwrap();
        assert!(produced.is_empty());
    }
}
