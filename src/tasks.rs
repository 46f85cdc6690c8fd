//! Polling surface for asynchronous conversion tasks.
//!
//! Deliberately minimal: one call to read a task's current state, one to
//! fetch a finished task's result. The client performs no scheduling, retry,
//! or backoff around these; polling cadence is the caller's decision.

use crate::client::Client;
use crate::error::Result;
use crate::output::{ConvertResponse, TaskStatus};

impl Client {
    /// Read the current state of a queued or running task.
    pub async fn task_status(&self, task_id: &str) -> Result<TaskStatus> {
        self.get_json(&["status", "poll", task_id]).await
    }

    /// Fetch the result of a finished conversion task.
    pub async fn task_result(&self, task_id: &str) -> Result<ConvertResponse> {
        self.get_json(&["result", task_id]).await
    }
}
