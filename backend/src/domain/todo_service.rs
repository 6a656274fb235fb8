//! Task use-cases: label translation, listing defaults and ownership.
//!
//! Update and delete both verify that the caller owns the task before
//! writing. A missing task and a task owned by someone else produce the same
//! [`ErrorCode::NotFoundOrUnauthorized`](crate::domain::ErrorCode) error so
//! callers cannot probe for other users' task ids.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{TaskRepository, TaskRepositoryError, TodoCommand, TodoQuery};
use crate::domain::{
    Error, InvalidDomainValue, ListTodosRequest, OperationDeadline, PageWindow, StatusFilter,
    Task, TaskDraft, TaskFields, TaskId, TaskPage, TaskPriority, TaskStatus, UserId,
};

/// Client-facing message for absent or foreign tasks.
pub const TASK_NOT_FOUND_OR_UNAUTHORIZED: &str = "task not found or unauthorized";

/// Task service implementing [`TodoCommand`] and [`TodoQuery`].
#[derive(Clone)]
pub struct TodoService<R> {
    tasks: Arc<R>,
    deadline: OperationDeadline,
}

impl<R> TodoService<R> {
    /// Create a service over the given task repository.
    pub fn new(tasks: Arc<R>, deadline: OperationDeadline) -> Self {
        Self { tasks, deadline }
    }
}

fn invalid_value(error: InvalidDomainValue) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.kind,
        "value": error.label,
        "code": "invalid_domain_value",
    }))
}

fn translate(fields: TaskFields) -> Result<TaskDraft, Error> {
    let priority =
        TaskPriority::from_optional_label(fields.priority.as_deref()).map_err(invalid_value)?;
    let status = TaskStatus::from_optional_label(fields.status.as_deref()).map_err(invalid_value)?;
    Ok(TaskDraft {
        title: fields.title,
        description: fields.description,
        priority,
        status,
        due_at: fields.due_at,
    })
}

fn not_found_or_unauthorized() -> Error {
    Error::not_found_or_unauthorized(TASK_NOT_FOUND_OR_UNAUTHORIZED)
}

fn map_repository_error(error: TaskRepositoryError) -> Error {
    match error {
        TaskRepositoryError::NotFound { id } => Error::not_found(format!("task {id} not found")),
        TaskRepositoryError::Connection { message } => {
            Error::internal(format!("task repository unavailable: {message}"))
        }
        TaskRepositoryError::Query { message } => {
            Error::internal(format!("task repository error: {message}"))
        }
        TaskRepositoryError::Timeout { message } => {
            Error::internal(format!("task repository timed out: {message}"))
        }
    }
}

impl<R> TodoService<R>
where
    R: TaskRepository,
{
    /// Load a task the caller owns, folding "absent" and "foreign" together.
    async fn owned_task(&self, owner: &UserId, task_id: TaskId) -> Result<Task, Error> {
        let lookup = self
            .deadline
            .run("task.get_by_id", self.tasks.get_by_id(task_id))
            .await;
        match lookup {
            Ok(task) if task.is_owned_by(owner) => Ok(task),
            Ok(_) => {
                debug!(%task_id, %owner, reason = "foreign_owner", "task access refused");
                Err(not_found_or_unauthorized())
            }
            Err(TaskRepositoryError::NotFound { .. }) => {
                debug!(%task_id, %owner, reason = "missing", "task access refused");
                Err(not_found_or_unauthorized())
            }
            Err(other) => Err(map_repository_error(other)),
        }
    }
}

#[async_trait]
impl<R> TodoCommand for TodoService<R>
where
    R: TaskRepository,
{
    async fn create_todo(&self, owner: &UserId, fields: TaskFields) -> Result<Task, Error> {
        let draft = translate(fields)?;
        let task = self
            .deadline
            .run("task.create", self.tasks.create(owner, &draft))
            .await
            .map_err(map_repository_error)?;
        info!(task_id = %task.id, %owner, "task created");
        Ok(task)
    }

    async fn update_todo(
        &self,
        owner: &UserId,
        task_id: TaskId,
        fields: TaskFields,
    ) -> Result<Task, Error> {
        let draft = translate(fields)?;
        self.owned_task(owner, task_id).await?;
        let updated = self
            .deadline
            .run("task.update_by_id", self.tasks.update_by_id(task_id, &draft))
            .await
            .map_err(|error| match error {
                TaskRepositoryError::NotFound { .. } => not_found_or_unauthorized(),
                other => map_repository_error(other),
            })?;
        info!(%task_id, %owner, "task updated");
        Ok(updated)
    }

    async fn delete_todo(&self, owner: &UserId, task_id: TaskId) -> Result<(), Error> {
        self.owned_task(owner, task_id).await?;
        self.deadline
            .run("task.delete_by_id", self.tasks.delete_by_id(task_id))
            .await
            .map_err(|error| match error {
                TaskRepositoryError::NotFound { .. } => not_found_or_unauthorized(),
                other => map_repository_error(other),
            })?;
        info!(%task_id, %owner, "task deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> TodoQuery for TodoService<R>
where
    R: TaskRepository,
{
    async fn list_todos(
        &self,
        owner: &UserId,
        request: ListTodosRequest,
    ) -> Result<TaskPage, Error> {
        let filter = StatusFilter::parse(&request.status).map_err(invalid_value)?;
        let window = PageWindow::normalised(request.limit, request.offset);
        self.deadline
            .run(
                "task.list_by_owner",
                self.tasks.list_by_owner(owner, filter.status(), window),
            )
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
