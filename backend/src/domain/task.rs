//! Task aggregate and the request shapes used by the task use-cases.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{TaskPriority, TaskStatus, UserId};

/// Maximum length of a task title, in characters.
pub const TITLE_MAX: usize = 119;
/// Page size applied when the caller asks for zero or fewer items.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Validation errors for task fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("task id must be a positive integer")]
    InvalidId,
}

/// Store-assigned sequential task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TaskId(i64);

impl TaskId {
    /// Validate a raw identifier.
    pub fn new(value: i64) -> Result<Self, TaskValidationError> {
        if value <= 0 {
            return Err(TaskValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TaskId> for i64 {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for TaskId {
    type Error = TaskValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Non-empty, bounded task title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Validate a title; surrounding whitespace is trimmed.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(TaskValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Task fields as supplied by a client, with priority and status still in
/// label form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: TaskTitle,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
}

/// Mutable task content after label translation; what the task store writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: TaskTitle,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_at: Option<DateTime<Utc>>,
}

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[schema(value_type = i64, example = 42)]
    pub id: TaskId,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: UserId,
    #[schema(value_type = String, example = "buy milk")]
    pub title: TaskTitle,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether `user_id` owns this task.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// Normalised limit/offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    limit: i64,
    offset: i64,
}

impl PageWindow {
    /// Apply the listing defaults: a limit of zero or less becomes
    /// [`DEFAULT_PAGE_LIMIT`], a negative offset becomes zero.
    ///
    /// # Examples
    /// ```
    /// use taskboard::domain::PageWindow;
    ///
    /// let window = PageWindow::normalised(0, -5);
    /// assert_eq!((window.limit(), window.offset()), (10, 0));
    /// ```
    pub fn normalised(limit: i64, offset: i64) -> Self {
        Self {
            limit: if limit <= 0 { DEFAULT_PAGE_LIMIT } else { limit },
            offset: offset.max(0),
        }
    }

    pub fn limit(self) -> i64 {
        self.limit
    }

    pub fn offset(self) -> i64 {
        self.offset
    }
}

/// Listing parameters as received from a client, before defaults apply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListTodosRequest {
    /// Status label, `ALL`, or empty for all statuses.
    pub status: String,
    pub limit: i64,
    pub offset: i64,
}

/// One page of an owner's tasks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    /// Count of every task matching the filter, ignoring the window.
    pub total_count: i64,
}
