//! Parameterized statement execution against the storage backend.
//!
//! The query engine only ever talks to storage through these traits: a
//! statement text plus an ordered list of bound [`SqlValue`]s. The
//! PostgreSQL implementation lives in `csemotors-database`.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::value::SqlValue;

/// Executes statements that return a scalar count or an affected-row count.
#[async_trait]
pub trait StatementExecutor: Send + Sync + 'static {
    /// Run a statement whose single row holds a single `BIGINT` column
    /// (typically `SELECT COUNT(*) ...`).
    async fn fetch_count(&self, sql: &str, params: &[SqlValue]) -> AppResult<i64>;

    /// Run a mutation and return the number of rows it affected.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> AppResult<u64>;
}

/// Executes statements that return rows decoded as `R`.
#[async_trait]
pub trait RowFetcher<R>: StatementExecutor
where
    R: Send + 'static,
{
    /// Run a statement and decode every returned row.
    async fn fetch_rows(&self, sql: &str, params: &[SqlValue]) -> AppResult<Vec<R>>;
}
