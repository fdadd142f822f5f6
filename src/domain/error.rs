//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses or any other protocol-specific envelope; the domain only cares
//! about the failure category and a human-readable message.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
///
/// Every code is terminal for the operation that raised it: the protocol
/// performs no retries and the caller decides whether to resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Create was called with a pre-populated identifier.
    IdentifierConflict,
    /// Update was called with no identifier on the body.
    MissingIdentifier,
    /// Path and body identifiers disagree.
    IdentifierMismatch,
    /// The targeted record does not exist.
    NotFound,
    /// A field-level constraint was violated.
    ValidationFailure,
    /// An unexpected error occurred inside the domain or an adapter.
    InternalError,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use asset_registry::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::not_found("asset 7 does not exist");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    #[schema(example = "identifier_mismatch")]
    code: ErrorCode,
    #[schema(example = "path and body identifiers disagree")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl DomainError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use asset_registry::domain::DomainError;
    /// use serde_json::json;
    ///
    /// let err = DomainError::validation_failure("unknown filter")
    ///     .with_details(json!({ "filter": "bogus" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::IdentifierConflict`].
    pub fn identifier_conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IdentifierConflict, message)
    }

    /// Convenience constructor for [`ErrorCode::MissingIdentifier`].
    pub fn missing_identifier(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingIdentifier, message)
    }

    /// Convenience constructor for [`ErrorCode::IdentifierMismatch`].
    pub fn identifier_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IdentifierMismatch, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailure`].
    pub fn validation_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}
