//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, plus the services that implement the driving ports.
//! Types are immutable once validated; each documents its invariants and
//! serialisation contract in its own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User, UserProfile: stored account and its credential-free view.
//! - Task, TaskPriority, TaskStatus: task aggregate and closed value sets.
//! - TodoService, AccountService: use-case implementations.

pub mod account_service;
pub mod auth;
pub mod deadline;
pub mod error;
pub mod ports;
pub mod task;
pub mod task_values;
pub mod todo_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, INVALID_CREDENTIALS, PROFILE_CACHE_TTL};
pub use self::auth::{
    AccessToken, AuthenticatedUser, Claims, CredentialsValidationError, LoginCredentials,
    PASSWORD_MAX_BYTES, SignUpDetails, TOKEN_LIFETIME_SECS,
};
pub use self::deadline::{DEFAULT_OPERATION_TIMEOUT, DeadlineExceeded, OperationDeadline};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::task::{
    DEFAULT_PAGE_LIMIT, ListTodosRequest, PageWindow, TITLE_MAX, Task, TaskDraft, TaskFields,
    TaskId, TaskPage, TaskTitle, TaskValidationError,
};
pub use self::task_values::{
    ALL_STATUSES, InvalidDomainValue, StatusFilter, TaskPriority, TaskStatus, UnknownDomainCode,
};
pub use self::todo_service::{TASK_NOT_FOUND_OR_UNAUTHORIZED, TodoService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, PasswordDigest, ProfileSource, USERNAME_MAX, User, UserId,
    UserProfile, UserValidationError, Username,
};

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use taskboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
