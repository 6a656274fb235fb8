//! Shared Diesel error mapping for the repository adapters.
//!
//! Each repository supplies its own error constructors; these helpers decide
//! which constructor a pool or Diesel failure belongs to and emit the debug
//! context once.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, error};

use super::pool::PoolError;

/// Map a pool failure through the repository's connection constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map common Diesel failures into query or connection errors.
///
/// Callers handle `NotFound` and constraint violations they care about
/// before falling back to this.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    operation: &'static str,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(%error, operation, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Whether the failure is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Decode one row, logging and mapping a failure.
pub(crate) fn decode_row<R, T, E>(
    row: R,
    decode: impl FnOnce(R) -> Result<T, String>,
    query: impl FnOnce(String) -> E,
) -> Result<T, E> {
    decode(row).map_err(|message| {
        error!(%message, "stored row failed to decode");
        query(message)
    })
}

/// Decode rows, logging and mapping the first undecodable one.
pub(crate) fn decode_rows<R, T, E>(
    rows: Vec<R>,
    decode: impl Fn(R) -> Result<T, String>,
    query: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    rows.into_iter()
        .map(decode)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| {
            error!(%message, "stored row failed to decode");
            query(message)
        })
}
