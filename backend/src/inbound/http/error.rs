//! HTTP mapping for domain errors.
//!
//! The domain error type stays transport agnostic; this module decides the
//! status code and what a client may see of the message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TASK_NOT_FOUND_OR_UNAUTHORIZED, TRACE_ID_HEADER};

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        // Absent and foreign tasks are indistinguishable to the caller and
        // surface as a server failure, matching existing clients.
        ErrorCode::NotFoundOrUnauthorized | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Client-facing copy of `error`.
///
/// Internal messages are replaced; the trace id survives so the response can
/// still be matched to server logs.
fn redact_if_internal(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            let redacted = Error::internal(REDACTED_MESSAGE);
            match error.trace_id() {
                Some(id) => redacted.with_trace_id(id),
                None => redacted,
            }
        }
        ErrorCode::NotFoundOrUnauthorized => {
            let generic = Error::not_found_or_unauthorized(TASK_NOT_FOUND_OR_UNAUTHORIZED);
            match error.trace_id() {
                Some(id) => generic.with_trace_id(id),
                None => generic,
            }
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    async fn body_of(error: &Error) -> Value {
        let bytes = to_bytes(error.error_response().into_body())
            .await
            .expect("readable body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
    #[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
    #[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ErrorCode::NotFoundOrUnauthorized, StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] code: ErrorCode, #[case] status: StatusCode) {
        assert_eq!(Error::new(code, "boom").status_code(), status);
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let error = Error::internal("connection refused: db-01:5432").with_trace_id("abc");
        let body = body_of(&error).await;
        assert_eq!(body["code"], "internal_error");
        assert_eq!(body["message"], REDACTED_MESSAGE);
        assert_eq!(body["traceId"], "abc");
    }

    #[actix_web::test]
    async fn ownership_failures_keep_the_generic_message() {
        let error = Error::not_found_or_unauthorized(TASK_NOT_FOUND_OR_UNAUTHORIZED);
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(&error).await;
        assert_eq!(body["code"], "not_found_or_unauthorized");
        assert_eq!(body["message"], TASK_NOT_FOUND_OR_UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn client_errors_pass_through_with_details() {
        let error = Error::invalid_request("title must not be empty")
            .with_details(json!({ "field": "title" }));
        let body = body_of(&error).await;
        assert_eq!(body["message"], "title must not be empty");
        assert_eq!(body["details"]["field"], "title");
    }

    #[rstest]
    fn trace_id_is_echoed_as_header() {
        let response = Error::conflict("taken").with_trace_id("trace-1").error_response();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("trace-1")
        );
    }
}
