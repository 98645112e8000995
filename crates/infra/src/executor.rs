//! Statement execution boundary.
//!
//! Repositories produce [`Statement`]s (SQL text with `$n` placeholders plus
//! positional values) and hand them to a [`StatementExecutor`]. The SQL text
//! never contains caller-supplied values.

use std::sync::Arc;

use jobly_core::{CompanyHandle, Equity, Job, Salary};

use crate::error::StoreError;

/// A typed value bound to one placeholder.
///
/// Nullable variants keep their SQL type, so binding `NULL` to a numeric
/// column still sends a numeric parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Integer(Option<i32>),
    /// Exact decimal, carried as its text form.
    Numeric(Option<String>),
}

impl From<Option<Salary>> for SqlValue {
    fn from(value: Option<Salary>) -> Self {
        SqlValue::Integer(value.map(|s| s.amount()))
    }
}

impl From<Option<Equity>> for SqlValue {
    fn from(value: Option<Equity>) -> Self {
        SqlValue::Numeric(value.map(String::from))
    }
}

impl From<&CompanyHandle> for SqlValue {
    fn from(value: &CompanyHandle) -> Self {
        SqlValue::Text(value.as_str().to_string())
    }
}

/// SQL text plus its positional parameters; `params[i]` binds to `$(i+1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Number of distinct `$n` placeholders referenced by the text.
    pub fn placeholder_count(&self) -> usize {
        let mut seen = std::collections::BTreeSet::new();
        let bytes = self.sql.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if end > start {
                    seen.insert(&self.sql[start..end]);
                }
                i = end.max(i + 1);
            } else {
                i += 1;
            }
        }
        seen.len()
    }
}

/// A job row as returned by the store, columns already renamed
/// (`company_handle AS "companyHandle"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

impl TryFrom<JobRow> for Job {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let decode = |e: jobly_core::DomainError| StoreError::Decode(format!("job row: {e}"));
        Ok(Job {
            title: row.title,
            salary: row.salary.map(|s| Salary::new(s.into())).transpose().map_err(decode)?,
            equity: row.equity.map(Equity::parse).transpose().map_err(decode)?,
            company_handle: CompanyHandle::new(row.company_handle).map_err(decode)?,
        })
    }
}

impl From<Job> for JobRow {
    fn from(job: Job) -> Self {
        JobRow {
            title: job.title,
            salary: job.salary.map(|s| s.amount()),
            equity: job.equity.map(String::from),
            company_handle: job.company_handle.into(),
        }
    }
}

/// Executes one parameterized statement and returns the rows it produced
/// (`RETURNING` rows for writes).
#[async_trait::async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, statement: &Statement) -> Result<Vec<JobRow>, StoreError>;
}

#[async_trait::async_trait]
impl<E> StatementExecutor for Arc<E>
where
    E: StatementExecutor + ?Sized,
{
    async fn execute(&self, statement: &Statement) -> Result<Vec<JobRow>, StoreError> {
        (**self).execute(statement).await
    }
}
