//! Postgres-backed statement executor.
//!
//! ## Thread Safety
//!
//! Uses SQLx connection pool which is thread-safe (Arc + Send + Sync).
//! Every statement runs on whichever pooled connection is free; there are no
//! explicit transactions, so each statement is atomic on its own.

use std::sync::Arc;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::error::{StoreError, map_sqlx_error};
use crate::executor::{JobRow, SqlValue, Statement, StatementExecutor};
use crate::numeric::numeric_param;

/// Runs [`Statement`]s against a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: Arc<PgPool>,
}

impl PgExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool: Arc::new(pool) }
    }

    /// Build a pool that connects on first use.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

struct PgJobRow(JobRow);

impl<'r> sqlx::FromRow<'r, PgRow> for PgJobRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(PgJobRow(JobRow {
            title: row.try_get("title")?,
            salary: row.try_get("salary")?,
            // Selected as `equity::text`; see `crate::numeric`.
            equity: row.try_get("equity")?,
            company_handle: row.try_get("companyHandle")?,
        }))
    }
}

#[async_trait::async_trait]
impl StatementExecutor for PgExecutor {
    #[instrument(skip(self, statement), fields(params = statement.params.len()), err)]
    async fn execute(&self, statement: &Statement) -> Result<Vec<JobRow>, StoreError> {
        let mut query = sqlx::query_as::<_, PgJobRow>(&statement.sql);
        for value in &statement.params {
            query = match value {
                SqlValue::Text(s) => query.bind(s.clone()),
                SqlValue::Integer(n) => query.bind(*n),
                SqlValue::Numeric(text) => query.bind(text.as_deref().map(numeric_param).transpose()?),
            };
        }

        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("execute", e))?;

        tracing::debug!(rows = rows.len(), "statement executed");
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
