//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs are checked field by field and every failure is collected, so
//! a `400` response lists all offending fields at once:
//!
//! ```json
//! {"code":"invalid_request","message":"request validation failed",
//!  "details":{"errors":[{"field":"title","code":"blank","message":"..."}]}}
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::domain::{
    Error, LabelValidationError, LoginValidationError, RecipeValidationError, UserValidationError,
};

/// Machine-readable code attached to each field failure.
pub(crate) trait ValidationCode {
    fn code(&self) -> &'static str;
}

impl ValidationCode for RecipeValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "blank",
            Self::TitleTooLong { .. } | Self::LinkTooLong { .. } => "too_long",
            Self::NegativeTime | Self::NegativePrice => "negative",
            Self::TimeTooLarge | Self::PriceTooLarge => "too_large",
            Self::InvalidPrice => "invalid_decimal",
            Self::PriceTooPrecise => "too_precise",
        }
    }
}

impl ValidationCode for LabelValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "blank",
            Self::NameTooLong { .. } => "too_long",
        }
    }
}

impl ValidationCode for UserValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::EmptyEmail => "blank",
            Self::InvalidId | Self::InvalidEmail => "invalid_format",
            Self::EmailTooLong { .. } => "too_long",
        }
    }
}

impl ValidationCode for LoginValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Email(inner) => inner.code(),
            Self::EmptyPassword => "blank",
            Self::PasswordTooShort { .. } => "too_short",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }

    /// Path of the `name` member of the `index`th object in a list field.
    pub(crate) fn nested_name(&self, index: usize) -> String {
        format!("{}[{index}].name", self.0)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Serialize)]
struct FieldError {
    field: String,
    code: &'static str,
    message: String,
}

/// Accumulates field failures while a request DTO is converted.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: impl Into<String>, code: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            code,
            message: message.into(),
        });
    }

    /// Record a missing required field and yield `None` in its place.
    pub(crate) fn required<T>(&mut self, field: FieldName, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(
                field.as_str(),
                "missing_field",
                format!("missing required field: {field}"),
            );
        }
        value
    }

    /// Keep the value of a successful conversion or record why it failed.
    pub(crate) fn check<T, E>(&mut self, field: impl Into<String>, result: Result<T, E>) -> Option<T>
    where
        E: ValidationCode + fmt::Display,
    {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(field, error.code(), error.to_string());
                None
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok` when nothing failed, otherwise the `invalid_request` envelope.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        Err(self.into_error())
    }

    fn into_error(self) -> Error {
        let message = match self.0.as_slice() {
            [single] => single.message.clone(),
            _ => "request validation failed".to_owned(),
        };
        Error::invalid_request(message).with_details(json!({ "errors": self.0 }))
    }
}

/// `invalid_request` envelope for a single failing field.
pub(crate) fn field_error<E>(field: FieldName, error: E) -> Error
where
    E: ValidationCode + fmt::Display,
{
    let mut errors = FieldErrors::new();
    errors.push(field.as_str(), error.code(), error.to_string());
    errors.into_error()
}

/// Unwrap values gathered through [`FieldErrors`] after [`FieldErrors::finish`]
/// succeeded.
///
/// A `None` here means a helper skipped recording its failure.
pub(crate) fn collected<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| Error::internal(format!("validated field {field} was not collected")))
}
