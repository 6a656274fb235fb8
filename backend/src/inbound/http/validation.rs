//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes an `invalid_request` error whose `details` name the
//! offending field and a machine-readable code.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{CredentialsValidationError, Error, TaskId, TaskTitle, TaskValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
    InvalidId,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidValue => "invalid_value",
            Self::InvalidId => "invalid_id",
            Self::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Request field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const DUE_AT: FieldName = FieldName::new("dueAt");
pub(crate) const TASK_ID: FieldName = FieldName::new("id");

struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap a required body field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Map signup/login validation failures onto the field they concern.
///
/// The rejected value is omitted; it may be a password.
pub(crate) fn credentials_error(error: &CredentialsValidationError) -> Error {
    ValidationError::new(FieldName::new(error.field()), error.to_string())
        .with_code(ErrorCode::InvalidValue)
}

pub(crate) fn parse_title(raw: &str) -> Result<TaskTitle, Error> {
    TaskTitle::new(raw).map_err(|err: TaskValidationError| {
        ValidationError::new(TITLE, err.to_string()).with_code(ErrorCode::InvalidValue)
    })
}

pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    raw.parse::<i64>()
        .ok()
        .and_then(|value| TaskId::new(value).ok())
        .ok_or_else(|| {
            ValidationError::new(TASK_ID, "task id must be a positive integer")
                .with_value(ErrorCode::InvalidId, raw)
        })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| {
                    let name = field.as_str();
                    ValidationError::new(field, format!("{name} must be an RFC 3339 timestamp"))
                        .with_value(ErrorCode::InvalidTimestamp, raw)
                })
        })
        .transpose()
}
