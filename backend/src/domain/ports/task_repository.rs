//! Driven port for task persistence.
//!
//! The repository owns query construction only. Ownership checks and label
//! translation belong to the task service.

use async_trait::async_trait;

use crate::domain::{DeadlineExceeded, PageWindow, Task, TaskDraft, TaskId, TaskPage, TaskStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
        /// No task has the requested identifier.
        NotFound { id: i64 } => "task {id} not found",
        /// The call outlived the request deadline.
        Timeout { message: String } => "task repository timed out: {message}",
    }
}

impl From<DeadlineExceeded> for TaskRepositoryError {
    fn from(value: DeadlineExceeded) -> Self {
        Self::timeout(value.to_string())
    }
}

/// Port for reading and writing tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task for `owner`; the store assigns id and timestamps.
    async fn create(&self, owner: &UserId, draft: &TaskDraft) -> Result<Task, TaskRepositoryError>;

    /// One page of `owner`'s tasks, newest first, plus the filtered total.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        status: Option<TaskStatus>,
        window: PageWindow,
    ) -> Result<TaskPage, TaskRepositoryError>;

    /// Replace every mutable field and refresh `updated_at`.
    async fn update_by_id(&self, id: TaskId, draft: &TaskDraft) -> Result<Task, TaskRepositoryError>;

    /// Hard delete.
    async fn delete_by_id(&self, id: TaskId) -> Result<(), TaskRepositoryError>;

    /// Fetch a task or fail with [`TaskRepositoryError::NotFound`].
    async fn get_by_id(&self, id: TaskId) -> Result<Task, TaskRepositoryError>;
}
