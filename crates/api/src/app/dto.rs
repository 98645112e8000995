use serde::Deserialize;

use jobly_core::{DomainError, DomainResult, EquityFilter, JobFilter, Salary};

/// `GET /jobs` query string. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsQuery {
    pub title: Option<String>,
    pub min_salary: Option<String>,
    pub has_equity: Option<String>,
}

impl JobsQuery {
    /// `None` when no filter was supplied, i.e. the caller wants every job.
    pub fn into_filter(self) -> DomainResult<Option<JobFilter>> {
        let title = non_empty(self.title);
        let min_salary = non_empty(self.min_salary);
        let has_equity = non_empty(self.has_equity);

        if title.is_none() && min_salary.is_none() && has_equity.is_none() {
            return Ok(None);
        }

        let min_salary = min_salary
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| DomainError::validation("minSalary must be an integer"))
                    .and_then(Salary::new)
            })
            .transpose()?;

        Ok(Some(JobFilter {
            title,
            min_salary,
            has_equity: EquityFilter::from_flag(has_equity.as_deref()),
        }))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
