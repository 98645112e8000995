use std::sync::Arc;

use jobly_infra::{JobRepository, StatementExecutor};

/// Repository type shared by the handlers.
pub type Jobs = JobRepository<Arc<dyn StatementExecutor>>;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppServices {
    pub jobs: Jobs,
}

impl AppServices {
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self {
            jobs: JobRepository::new(executor),
        }
    }
}
