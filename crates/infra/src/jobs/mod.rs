//! Job postings storage.
//!
//! Jobs are addressed by the handle of the company that owns them; the
//! repository is the only place that knows the `company_handle` column.

pub mod repository;

pub use repository::{JOB_UPDATE_COLUMNS, JobRepository};
