//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{DomainError, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::IdentifierConflict
        | ErrorCode::MissingIdentifier
        | ErrorCode::IdentifierMismatch
        | ErrorCode::ValidationFailure => StatusCode::BAD_REQUEST,
        // New codes default to a client error until mapped explicitly.
        _ => StatusCode::BAD_REQUEST,
    }
}

fn redact_if_internal(error: &DomainError) -> DomainError {
    if matches!(error.code(), ErrorCode::InternalError) {
        DomainError::internal("internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for DomainError {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        DomainError::internal("internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::conflict(DomainError::identifier_conflict("x"), StatusCode::BAD_REQUEST)]
    #[case::missing(DomainError::missing_identifier("x"), StatusCode::BAD_REQUEST)]
    #[case::mismatch(DomainError::identifier_mismatch("x"), StatusCode::BAD_REQUEST)]
    #[case::validation(DomainError::validation_failure("x"), StatusCode::BAD_REQUEST)]
    #[case::not_found(DomainError::not_found("x"), StatusCode::NOT_FOUND)]
    #[case::internal(DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] err: DomainError, #[case] status: StatusCode) {
        assert_eq!(err.status_code(), status);
    }

    #[rstest]
    fn internal_details_are_redacted() {
        let err = DomainError::internal("lock poisoned in store");
        let redacted = redact_if_internal(&err);
        assert_eq!(redacted.message(), "internal server error");
    }

    #[rstest]
    fn client_errors_keep_their_message() {
        let err = DomainError::not_found("employee 3 does not exist");
        let kept = redact_if_internal(&err);
        assert_eq!(kept.message(), "employee 3 does not exist");
    }
}
