//! The row source contract

use async_trait::async_trait;
use rowcache_core::{Result, Row, Value};

/// Executes a statement and produces raw result rows
///
/// Rows are produced in the order the underlying client yields them; the
/// sequence is finite and not restartable. `max_rows` bounds production
/// itself — a source asked for one row must not fetch more than one.
/// Preparation, binding, and execution failures are reported as
/// [`QueryError::Execution`](rowcache_core::QueryError::Execution) and reach
/// the caller unmodified.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Execute `statement` with positional `params`, producing at most
    /// `max_rows` rows (all rows when `None`)
    async fn query(
        &self,
        statement: &str,
        params: &[Value],
        max_rows: Option<usize>,
    ) -> Result<Vec<Row>>;
}
