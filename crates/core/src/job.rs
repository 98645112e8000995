//! Job entity, its creation/patch inputs and read filters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};
use crate::handle::CompanyHandle;
use crate::value_object::{Equity, Salary};

/// A job posting owned by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub title: String,
    pub salary: Option<Salary>,
    pub equity: Option<Equity>,
    pub company_handle: CompanyHandle,
}

/// Input for creating a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<Salary>,
    #[serde(default)]
    pub equity: Option<Equity>,
    pub company_handle: CompanyHandle,
}

impl NewJob {
    pub fn new(
        title: impl Into<String>,
        salary: Option<Salary>,
        equity: Option<Equity>,
        company_handle: CompanyHandle,
    ) -> DomainResult<Self> {
        let job = Self {
            title: title.into(),
            salary,
            equity,
            company_handle,
        };
        job.validate()?;
        Ok(job)
    }

    /// Checks the rules serde cannot express on its own.
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title must not be empty"));
        }
        Ok(())
    }
}

/// Fields a partial update may target.
///
/// `title` and `companyHandle` are deliberately absent: the update path only
/// edits compensation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JobField {
    Salary,
    Equity,
}

impl JobField {
    pub const ALL: [JobField; 2] = [JobField::Salary, JobField::Equity];

    /// Application-side field name (as sent on the wire).
    pub fn name(&self) -> &'static str {
        match self {
            JobField::Salary => "salary",
            JobField::Equity => "equity",
        }
    }
}

impl core::str::FromStr for JobField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| DomainError::validation(format!("field '{s}' cannot be updated")))
    }
}

/// A single field assignment inside a [`JobPatch`]. `None` clears the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchValue {
    Salary(Option<Salary>),
    Equity(Option<Equity>),
}

impl PatchValue {
    pub fn field(&self) -> JobField {
        match self {
            PatchValue::Salary(_) => JobField::Salary,
            PatchValue::Equity(_) => JobField::Equity,
        }
    }
}

/// Ordered set of field assignments for a partial update.
///
/// Each field appears at most once; setting a field again replaces the earlier
/// value in place, keeping its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    values: Vec<PatchValue>,
}

impl JobPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, value: PatchValue) -> Self {
        self.set(value);
        self
    }

    pub fn set(&mut self, value: PatchValue) {
        match self.values.iter_mut().find(|v| v.field() == value.field()) {
            Some(slot) => *slot = value,
            None => self.values.push(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatchValue> {
        self.values.iter()
    }

    /// Build a patch from a JSON object, in the object's iteration order.
    ///
    /// Unknown keys are rejected rather than passed through as column names.
    pub fn from_json_object(object: &Map<String, Value>) -> DomainResult<Self> {
        let mut patch = Self::new();
        for (key, value) in object {
            let field: JobField = key.parse()?;
            let value = match field {
                JobField::Salary => PatchValue::Salary(match value {
                    Value::Null => None,
                    Value::Number(n) => {
                        let amount = n
                            .as_i64()
                            .ok_or_else(|| DomainError::validation("salary must be an integer"))?;
                        Some(Salary::new(amount)?)
                    }
                    _ => return Err(DomainError::validation("salary must be an integer")),
                }),
                JobField::Equity => PatchValue::Equity(match value {
                    Value::Null => None,
                    Value::String(s) => Some(Equity::parse(s.as_str())?),
                    _ => return Err(DomainError::validation("equity must be a decimal string")),
                }),
            };
            patch.set(value);
        }
        Ok(patch)
    }
}

/// Equity predicate for filtered listings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EquityFilter {
    /// No equity predicate.
    #[default]
    Any,
    /// Only jobs with non-null, strictly positive equity.
    Positive,
}

impl EquityFilter {
    /// Interpret the `hasEquity` query flag.
    ///
    /// Only the literal `"true"` filters. `"false"` does NOT mean "no equity";
    /// it, like any other value, leaves the listing unfiltered.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("true") => EquityFilter::Positive,
            _ => EquityFilter::Any,
        }
    }
}

/// Criteria for filtered job listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Minimum salary; treated as 0 when absent.
    pub min_salary: Option<Salary>,
    pub has_equity: EquityFilter,
}

impl JobFilter {
    pub fn min_salary_or_default(&self) -> i32 {
        self.min_salary.map(|s| s.amount()).unwrap_or(0)
    }

    /// Whether `job` satisfies the filter, evaluated in Rust.
    ///
    /// This is the reference meaning of the filter. The storage query built
    /// from it must select exactly the jobs this accepts, and the Postgres
    /// tests check the two against each other.
    pub fn matches(&self, job: &Job) -> bool {
        let salary_ok = job
            .salary
            .is_some_and(|s| s.amount() >= self.min_salary_or_default());
        let equity_ok = match self.has_equity {
            EquityFilter::Any => true,
            EquityFilter::Positive => job.equity.as_ref().is_some_and(Equity::is_positive),
        };
        let title_ok = self
            .title
            .as_ref()
            .is_none_or(|t| job.title.to_lowercase().contains(&t.to_lowercase()));
        salary_ok && equity_ok && title_ok
    }
}
