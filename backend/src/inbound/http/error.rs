//! Rendering of domain errors as HTTP responses.
//!
//! The JSON body is the serialised [`Error`]; internal failures are replaced by
//! a generic message so storage or hashing details never reach clients. The
//! trace id is echoed as a header as well as in the body.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::validation::{FieldName, ValidationCode, field_error};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_view(self))
    }
}

/// The error as clients may see it.
fn public_view(error: &Error) -> Error {
    if error.status_code() != StatusCode::INTERNAL_SERVER_ERROR {
        return error.clone();
    }
    let redacted = Error::internal(INTERNAL_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

/// Request framing failures caught before a handler runs.
#[derive(Debug, thiserror::Error)]
enum RequestShapeError {
    #[error("expected an application/json body")]
    NotJson,
    #[error("JSON body is too large")]
    TooLarge,
    #[error("malformed JSON body: {0}")]
    Malformed(String),
    #[error("path identifier must be an integer")]
    InvalidId,
}

impl ValidationCode for RequestShapeError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotJson | Self::TooLarge | Self::Malformed(_) => "malformed_json",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// `JsonConfig` error handler: malformed bodies get the validation envelope
/// under the `body` field.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed JSON body");
    let shape = match err {
        JsonPayloadError::ContentType => RequestShapeError::NotJson,
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            RequestShapeError::TooLarge
        }
        JsonPayloadError::Deserialize(inner) => RequestShapeError::Malformed(inner.to_string()),
        other => RequestShapeError::Malformed(other.to_string()),
    };
    field_error(FieldName::new("body"), shape).into()
}

/// `PathConfig` error handler: a non-numeric id is a `400` on the `id` field.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed path");
    field_error(FieldName::new("id"), RequestShapeError::InvalidId).into()
}
