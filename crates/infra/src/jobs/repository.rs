use tracing::instrument;

use jobly_core::{CompanyHandle, DomainError, EquityFilter, Job, JobFilter, JobPatch, NewJob, PatchValue};

use crate::error::{RepositoryError, StoreError};
use crate::executor::{JobRow, SqlValue, Statement, StatementExecutor};
use crate::sql::{build_set_fragment, escape_like};

/// Application field name → column, for the partial-update path.
pub const JOB_UPDATE_COLUMNS: &[(&str, &str)] = &[("salary", "salary"), ("equity", "equity")];

/// `equity` is read back as text so its stored scale survives (see `crate::numeric`).
const JOB_COLUMNS: &str = r#"title, salary, equity::text AS equity, company_handle AS "companyHandle""#;

/// Data access for jobs, over any [`StatementExecutor`].
///
/// Every operation is a single statement. Nothing is retried.
#[derive(Debug, Clone)]
pub struct JobRepository<E> {
    executor: E,
}

impl<E> JobRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E: StatementExecutor> JobRepository<E> {
    /// Insert a job. An unknown company handle surfaces as
    /// `StoreError::ForeignKeyViolation`.
    #[instrument(skip(self, job), fields(company_handle = %job.company_handle), err)]
    pub async fn create(&self, job: &NewJob) -> Result<Job, RepositoryError> {
        let rows = self.executor.execute(&insert_statement(job)).await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no row".into()))?;
        Ok(Job::try_from(row)?)
    }

    /// All jobs, ordered by title.
    #[instrument(skip(self), err)]
    pub async fn list_all(&self) -> Result<Vec<Job>, RepositoryError> {
        let stmt = Statement::new(format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY title"), vec![]);
        into_jobs(self.executor.execute(&stmt).await?)
    }

    /// Jobs matching `filter`, in storage order.
    #[instrument(skip(self), err)]
    pub async fn list_filtered(&self, filter: &JobFilter) -> Result<Vec<Job>, RepositoryError> {
        into_jobs(self.executor.execute(&filter_statement(filter)).await?)
    }

    /// The job owned by `handle`; the first row if several exist.
    #[instrument(skip(self, handle), fields(company_handle = %handle), err)]
    pub async fn get_by_company_handle(&self, handle: &CompanyHandle) -> Result<Job, RepositoryError> {
        let stmt = Statement::new(
            format!("SELECT {JOB_COLUMNS} FROM jobs WHERE company_handle = $1"),
            vec![handle.into()],
        );
        first_job(self.executor.execute(&stmt).await?, handle)
    }

    /// Apply `patch` to the job owned by `handle`.
    #[instrument(skip(self, handle, patch), fields(company_handle = %handle, fields = patch.len()), err)]
    pub async fn update(&self, handle: &CompanyHandle, patch: &JobPatch) -> Result<Job, RepositoryError> {
        let stmt = update_statement(handle, patch)?;
        first_job(self.executor.execute(&stmt).await?, handle)
    }

    /// Delete the job owned by `handle`.
    #[instrument(skip(self, handle), fields(company_handle = %handle), err)]
    pub async fn remove(&self, handle: &CompanyHandle) -> Result<(), RepositoryError> {
        let stmt = Statement::new(
            format!("DELETE FROM jobs WHERE company_handle = $1 RETURNING {JOB_COLUMNS}"),
            vec![handle.into()],
        );
        let rows = self.executor.execute(&stmt).await?;
        if rows.is_empty() {
            return Err(DomainError::not_found(format!("No job: {handle}")).into());
        }
        tracing::info!(deleted = rows.len(), "job removed");
        Ok(())
    }
}

fn insert_statement(job: &NewJob) -> Statement {
    Statement::new(
        format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {JOB_COLUMNS}"
        ),
        vec![
            SqlValue::Text(job.title.clone()),
            job.salary.into(),
            job.equity.clone().into(),
            (&job.company_handle).into(),
        ],
    )
}

fn filter_statement(filter: &JobFilter) -> Statement {
    let mut predicates = vec!["salary >= $1".to_string()];
    let mut params = vec![SqlValue::Integer(Some(filter.min_salary_or_default()))];

    if filter.has_equity == EquityFilter::Positive {
        predicates.push("equity > 0 AND equity IS NOT NULL".to_string());
    }

    if let Some(title) = &filter.title {
        params.push(SqlValue::Text(format!("%{}%", escape_like(title))));
        predicates.push(format!("title ILIKE ${}", params.len()));
    }

    Statement::new(
        format!("SELECT {JOB_COLUMNS} FROM jobs WHERE {}", predicates.join(" AND ")),
        params,
    )
}

fn update_statement(handle: &CompanyHandle, patch: &JobPatch) -> Result<Statement, DomainError> {
    let fields = patch.iter().map(|value| {
        let sql_value = match value {
            PatchValue::Salary(salary) => SqlValue::from(*salary),
            PatchValue::Equity(equity) => SqlValue::from(equity.clone()),
        };
        (value.field().name(), sql_value)
    });

    let fragment = build_set_fragment(fields, JOB_UPDATE_COLUMNS)?;
    let handle_idx = fragment.next_placeholder();
    let sql = format!(
        "UPDATE jobs SET {} WHERE company_handle = ${handle_idx} RETURNING {JOB_COLUMNS}",
        fragment.sql
    );

    let mut params = fragment.into_values();
    params.push(handle.into());
    Ok(Statement::new(sql, params))
}

fn into_jobs(rows: Vec<JobRow>) -> Result<Vec<Job>, RepositoryError> {
    rows.into_iter()
        .map(|row| Job::try_from(row).map_err(RepositoryError::from))
        .collect()
}

fn first_job(rows: Vec<JobRow>, handle: &CompanyHandle) -> Result<Job, RepositoryError> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::not_found(format!("No job: {handle}")))?;
    Ok(Job::try_from(row)?)
}
