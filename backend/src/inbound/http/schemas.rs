//! Documentation-only mirrors of the error payload.
//!
//! The domain [`Error`](crate::domain::Error) stays free of utoipa derives, so
//! the wire shape is described here instead, including the validation report
//! carried in `details`.

use utoipa::ToSchema;

/// Machine-readable failure category.
#[derive(ToSchema)]
#[schema(as = ErrorCode, rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    InvalidRequest,
    Unauthorized,
    Forbidden,
    /// Also returned for records owned by someone else.
    NotFound,
    Conflict,
    ServiceUnavailable,
    InternalError,
}

/// One rejected request field.
#[derive(ToSchema)]
#[schema(as = FieldError)]
#[expect(dead_code, reason = "schema-only type")]
pub struct FieldErrorSchema {
    #[schema(example = "title")]
    field: String,
    #[schema(example = "blank")]
    code: String,
    #[schema(example = "title must not be empty")]
    message: String,
}

/// Validation report attached to `invalid_request` errors.
#[derive(ToSchema)]
#[schema(as = ValidationDetails)]
#[expect(dead_code, reason = "schema-only type")]
pub struct ValidationDetailsSchema {
    errors: Vec<FieldErrorSchema>,
}

/// Error body returned by every endpoint.
///
/// Internal failures always carry the generic message `Internal server error`.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "schema-only type")]
pub struct ErrorSchema {
    code: ErrorCodeSchema,
    #[schema(example = "request validation failed")]
    message: String,
    /// Same value as the `trace-id` response header.
    #[schema(example = "6f1c2b9e-4f5d-4c1a-9a63-2d4e8f0b7c11")]
    trace_id: Option<String>,
    details: Option<ValidationDetailsSchema>,
}
