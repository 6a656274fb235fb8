//! Driving ports for the task use-cases.
//!
//! Inbound adapters call these with the authenticated caller's id; the
//! implementation decides what that caller may touch.

use async_trait::async_trait;

use crate::domain::{Error, ListTodosRequest, Task, TaskFields, TaskId, TaskPage, UserId};

/// Mutating task use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCommand: Send + Sync {
    /// Create a task owned by `owner`.
    async fn create_todo(&self, owner: &UserId, fields: TaskFields) -> Result<Task, Error>;

    /// Replace the fields of a task owned by `owner`.
    async fn update_todo(
        &self,
        owner: &UserId,
        task_id: TaskId,
        fields: TaskFields,
    ) -> Result<Task, Error>;

    /// Delete a task owned by `owner`.
    async fn delete_todo(&self, owner: &UserId, task_id: TaskId) -> Result<(), Error>;
}

/// Read-only task use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoQuery: Send + Sync {
    /// List `owner`'s tasks with the listing defaults applied.
    async fn list_todos(&self, owner: &UserId, request: ListTodosRequest)
    -> Result<TaskPage, Error>;
}
