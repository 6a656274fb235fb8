//! Task API handlers.
//!
//! Every route requires a bearer token; the caller's id scopes each
//! operation.
//!
//! ```text
//! POST   /api/v1/user/todos        {"title":"buy milk","priority":"HIGH"}
//! POST   /api/v1/user/todos/list   {"status":"PENDING","limit":10,"offset":0}
//! PATCH  /api/v1/user/todos/{id}   {"title":"buy milk","status":"COMPLETED"}
//! DELETE /api/v1/user/todos/{id}
//! ```

use actix_web::{HttpResponse, delete, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::state::HttpState;
use super::validation::{
    DUE_AT, TITLE, parse_optional_rfc3339_timestamp, parse_task_id, parse_title, require,
};
use crate::domain::{ApiResult, AuthenticatedUser, Error, ListTodosRequest, Task, TaskFields};

const TASK_DELETED: &str = "Todo deleted successfully";

/// Task fields accepted on create and update.
///
/// Update replaces every field; omitted optional fields reset to their
/// defaults.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskFieldsRequest {
    #[schema(example = "buy milk")]
    pub title: Option<String>,
    pub description: Option<String>,
    /// `LOW`, `MEDIUM` or `HIGH`; defaults to `LOW`.
    #[schema(example = "HIGH")]
    pub priority: Option<String>,
    /// `PENDING` or `COMPLETED`; defaults to `PENDING`.
    #[schema(example = "PENDING")]
    pub status: Option<String>,
    /// RFC 3339 timestamp.
    #[schema(example = "2024-06-01T09:00:00Z")]
    pub due_at: Option<String>,
}

impl TryFrom<TaskFieldsRequest> for TaskFields {
    type Error = Error;

    fn try_from(value: TaskFieldsRequest) -> Result<Self, Self::Error> {
        let TaskFieldsRequest {
            title,
            description,
            priority,
            status,
            due_at,
        } = value;
        let title = parse_title(&require(title, TITLE)?)?;
        let due_at = parse_optional_rfc3339_timestamp(due_at.as_deref(), DUE_AT)?;
        Ok(Self {
            title,
            description,
            priority,
            status,
            due_at,
        })
    }
}

/// Listing parameters; all optional, and `null` counts as omitted.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ListTodosBody {
    /// Status label, `ALL`, or empty for every status.
    #[schema(example = "ALL")]
    pub status: Option<String>,
    /// Page size; zero or less means 10.
    pub limit: Option<i64>,
    /// Rows to skip; negative means 0.
    pub offset: Option<i64>,
}

impl From<ListTodosBody> for ListTodosRequest {
    fn from(value: ListTodosBody) -> Self {
        Self {
            status: value.status.unwrap_or_default(),
            limit: value.limit.unwrap_or_default(),
            offset: value.offset.unwrap_or_default(),
        }
    }
}

/// One page of the caller's tasks.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    /// Tasks matching the filter, ignoring the page window.
    pub total_count: i64,
    pub todos: Vec<Task>,
}

/// Plain acknowledgement body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a task owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/user/todos",
    request_body = TaskFieldsRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "createTodo",
    security(("bearer" = []))
)]
#[post("/user/todos")]
pub async fn create_todo(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<TaskFieldsRequest>,
) -> ApiResult<HttpResponse> {
    let fields = TaskFields::try_from(payload.into_inner())?;
    let task = state.todos.create_todo(user.user_id(), fields).await?;
    Ok(HttpResponse::Created().json(task))
}

/// List the caller's tasks, newest first.
#[utoipa::path(
    post,
    path = "/api/v1/user/todos/list",
    request_body = ListTodosBody,
    responses(
        (status = 200, description = "Tasks", body = TaskListResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["todos"],
    operation_id = "listTodos",
    security(("bearer" = []))
)]
#[post("/user/todos/list")]
pub async fn list_todos(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ListTodosBody>,
) -> ApiResult<web::Json<TaskListResponse>> {
    let page = state
        .todos_query
        .list_todos(user.user_id(), payload.into_inner().into())
        .await?;
    Ok(web::Json(TaskListResponse {
        total_count: page.total_count,
        todos: page.tasks,
    }))
}

/// Replace the fields of one of the caller's tasks.
#[utoipa::path(
    patch,
    path = "/api/v1/user/todos/{id}",
    params(("id" = i64, Path, description = "Task identifier")),
    request_body = TaskFieldsRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Task not found or unauthorized", body = Error)
    ),
    tags = ["todos"],
    operation_id = "updateTodo",
    security(("bearer" = []))
)]
#[patch("/user/todos/{id}")]
pub async fn update_todo(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<TaskFieldsRequest>,
) -> ApiResult<web::Json<Task>> {
    let task_id = parse_task_id(&path)?;
    let fields = TaskFields::try_from(payload.into_inner())?;
    let task = state
        .todos
        .update_todo(user.user_id(), task_id, fields)
        .await?;
    Ok(web::Json(task))
}

/// Delete one of the caller's tasks.
#[utoipa::path(
    delete,
    path = "/api/v1/user/todos/{id}",
    params(("id" = i64, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Task not found or unauthorized", body = Error)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo",
    security(("bearer" = []))
)]
#[delete("/user/todos/{id}")]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let task_id = parse_task_id(&path)?;
    state.todos.delete_todo(user.user_id(), task_id).await?;
    Ok(web::Json(MessageResponse {
        message: TASK_DELETED.to_owned(),
    }))
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
