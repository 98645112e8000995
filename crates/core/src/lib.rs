//! `jobly-core` — domain foundation for the job board.
//!
//! This crate contains **pure domain** types (no HTTP, no SQL).

pub mod error;
pub mod handle;
pub mod job;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use handle::CompanyHandle;
pub use job::{EquityFilter, Job, JobField, JobFilter, JobPatch, NewJob, PatchValue};
pub use value_object::{Equity, Salary};
