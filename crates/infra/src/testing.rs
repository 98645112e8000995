//! Scripted executor for tests/dev: records statements, replays canned rows.

use std::collections::VecDeque;
use std::sync::Mutex;

use jobly_core::Job;

use crate::error::StoreError;
use crate::executor::{JobRow, Statement, StatementExecutor};

/// Executor that never touches a database.
///
/// Responses are consumed in FIFO order; once the script is exhausted every
/// statement yields zero rows.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<Vec<JobRow>, StoreError>>>,
    statements: Mutex<Vec<Statement>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next statement.
    pub fn push_jobs(&self, jobs: impl IntoIterator<Item = Job>) -> &Self {
        let rows = jobs.into_iter().map(JobRow::from).collect();
        self.responses.lock().unwrap().push_back(Ok(rows));
        self
    }

    /// Queue a failure for the next statement.
    pub fn push_error(&self, err: StoreError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    /// Every statement executed so far, oldest first.
    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StatementExecutor for ScriptedExecutor {
    async fn execute(&self, statement: &Statement) -> Result<Vec<JobRow>, StoreError> {
        self.statements.lock().unwrap().push(statement.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
