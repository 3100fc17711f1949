//! PostgreSQL implementation of the storage executor traits.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::{Arguments, FromRow, Postgres};
use tracing::{debug, error};

use csemotors_core::error::{AppError, ErrorKind};
use csemotors_core::result::AppResult;
use csemotors_core::traits::{RowFetcher, StatementExecutor};
use csemotors_core::types::SqlValue;

/// Runs parameterized statements on a sqlx PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: PgPool,
}

impl PgExecutor {
    /// Create an executor over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Bind every value, in order, as a positional argument.
fn bind_params(params: &[SqlValue]) -> AppResult<PgArguments> {
    let mut args = PgArguments::default();
    for (index, value) in params.iter().enumerate() {
        let bound = match value {
            SqlValue::Integer(v) => args.add(*v),
            SqlValue::Boolean(v) => args.add(*v),
            SqlValue::Timestamp(v) => args.add(*v),
            SqlValue::Text(v) => args.add(v.clone()),
            SqlValue::TextList(v) => args.add(v.clone()),
        };
        // BoxDynError is not an `Error` impl, so keep its text only.
        bound.map_err(|e| {
            AppError::storage(format!("Failed to bind parameter ${}: {e}", index + 1))
        })?;
    }
    Ok(args)
}

fn storage_error(sql: &str, e: sqlx::Error) -> AppError {
    error!(error = %e, statement = sql, "Statement failed");
    AppError::with_source(
        ErrorKind::StorageFailure,
        format!("Database query failed: {e}"),
        e,
    )
}

#[async_trait]
impl StatementExecutor for PgExecutor {
    async fn fetch_count(&self, sql: &str, params: &[SqlValue]) -> AppResult<i64> {
        let args = bind_params(params)?;
        let count = sqlx::query_scalar_with::<Postgres, i64, _>(sql, args)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error(sql, e))?;
        debug!(params = params.len(), count, "Executed count query");
        Ok(count)
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> AppResult<u64> {
        let args = bind_params(params)?;
        let result = sqlx::query_with::<Postgres, _>(sql, args)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(sql, e))?;
        debug!(
            params = params.len(),
            rows_affected = result.rows_affected(),
            "Executed statement"
        );
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl<R> RowFetcher<R> for PgExecutor
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static,
{
    async fn fetch_rows(&self, sql: &str, params: &[SqlValue]) -> AppResult<Vec<R>> {
        let args = bind_params(params)?;
        let rows = sqlx::query_as_with::<Postgres, R, _>(sql, args)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error(sql, e))?;
        debug!(params = params.len(), rows = rows.len(), "Executed query");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_binds_every_value_kind() {
        let params = vec![
            SqlValue::from(3_i64),
            SqlValue::from(true),
            SqlValue::from(Utc::now()),
            SqlValue::from("%jeep%"),
            SqlValue::from(&["great", "superb"][..]),
        ];
        let args = bind_params(&params).unwrap();
        assert_eq!(args.len(), params.len());
    }
}
