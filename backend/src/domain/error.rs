//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses, WebSocket frames, or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state (e.g. idempotency replay
    /// with a different payload).
    Conflict,
    /// A write to the backing store failed; the operation may be retried.
    Persistence,
    /// A multi-step write was partially applied and the stored totals may be
    /// under-counted until reconciled.
    InconsistentState,
    /// An upstream provider could not be reached or answered with a failure.
    Upstream,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// Captures the request-scoped trace identifier at construction time so
/// adapters can correlate error responses with logs.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "Something went wrong")]
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary structured details (field errors, conflicting values).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the in-scope trace identifier if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "amount" }));
    /// assert!(err.details.is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::Persistence`].
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Persistence, message)
    }

    /// Convenience constructor for [`ErrorCode::InconsistentState`].
    pub fn inconsistent_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InconsistentState, message)
    }

    /// Convenience constructor for [`ErrorCode::Upstream`].
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Upstream, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_expected_codes() {
        let cases = [
            (Error::invalid_request("a"), ErrorCode::InvalidRequest),
            (Error::unauthorized("b"), ErrorCode::Unauthorized),
            (Error::forbidden("c"), ErrorCode::Forbidden),
            (Error::not_found("d"), ErrorCode::NotFound),
            (Error::conflict("e"), ErrorCode::Conflict),
            (Error::persistence("f"), ErrorCode::Persistence),
            (Error::inconsistent_state("g"), ErrorCode::InconsistentState),
            (Error::upstream("h"), ErrorCode::Upstream),
            (Error::internal("i"), ErrorCode::InternalError),
        ];
        for (err, code) in cases {
            assert_eq!(err.code, code);
        }
    }

    #[test]
    fn trace_id_is_absent_outside_request_scope() {
        let err = Error::internal("boom");
        assert!(err.trace_id.is_none());
    }

    #[tokio::test]
    async fn new_captures_trace_id_in_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let expected = trace_id.to_string();
        let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
        assert_eq!(error.trace_id.as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn details_round_trip_through_serde() {
        let err = Error::invalid_request("bad").with_details(json!({ "field": "amount" }));
        let value = serde_json::to_value(&err).expect("serialize");
        let back: Error = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, err);
    }

    #[test]
    fn serialises_codes_in_snake_case() {
        let value = serde_json::to_value(ErrorCode::InconsistentState).expect("serialize");
        assert_eq!(value, json!("inconsistent_state"));
    }
}
