//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Persistence => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InconsistentState | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
    }
}

/// Replace messages that could leak internals while keeping the code and
/// trace id so operators can correlate the incident.
fn redacted_for_client(error: &Error) -> Error {
    let message = match error.code {
        ErrorCode::InternalError => "Internal server error",
        ErrorCode::InconsistentState => "The operation could not be fully applied",
        _ => return error.clone(),
    };
    let mut redacted = Error::new(error.code, message);
    redacted.trace_id = error.trace_id.clone();
    redacted.details = None;
    redacted
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id.as_deref() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redacted_for_client(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
