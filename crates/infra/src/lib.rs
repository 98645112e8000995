//! Infrastructure layer: SQL construction, statement execution, repositories.

pub mod error;
pub mod executor;
pub mod jobs;
pub mod numeric;
pub mod postgres;
pub mod sql;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{RepositoryError, StoreError};
pub use executor::{JobRow, SqlValue, Statement, StatementExecutor};
pub use jobs::JobRepository;
pub use postgres::PgExecutor;
