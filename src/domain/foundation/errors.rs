//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and state mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' does not accept '{value}'")]
    UnknownValue { field: String, value: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an error for a value outside a closed set.
    pub fn unknown_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::UnknownValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidFormat,
    UnknownValue,

    // State errors
    InvalidStateTransition,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::UnknownValue => "UNKNOWN_VALUE",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let (code, field) = match &err {
            ValidationError::EmptyField { field } => (ErrorCode::EmptyField, field.clone()),
            ValidationError::InvalidFormat { field, .. } => {
                (ErrorCode::InvalidFormat, field.clone())
            }
            ValidationError::UnknownValue { field, .. } => (ErrorCode::UnknownValue, field.clone()),
        };
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("content");
        assert_eq!(format!("{}", err), "Field 'content' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("price", "not a currency amount");
        assert_eq!(
            format!("{}", err),
            "Field 'price' has invalid format: not a currency amount"
        );
    }

    #[test]
    fn validation_error_unknown_value_displays_correctly() {
        let err = ValidationError::unknown_value("category", "marinara");
        assert_eq!(format!("{}", err), "Field 'category' does not accept 'marinara'");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::InvalidStateTransition, "Order summary requested without a pizza");
        assert_eq!(
            format!("{}", err),
            "[INVALID_STATE_TRANSITION] Order summary requested without a pizza"
        );
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "category")
            .with_detail("reason", "unknown slug");

        assert_eq!(err.details.get("field"), Some(&"category".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"unknown slug".to_string()));
    }

    #[test]
    fn domain_error_from_validation_error_keeps_field() {
        let err: DomainError = ValidationError::unknown_value("category", "x").into();
        assert_eq!(err.code, ErrorCode::UnknownValue);
        assert_eq!(err.details.get("field"), Some(&"category".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::EmptyField), "EMPTY_FIELD");
        assert_eq!(format!("{}", ErrorCode::UnknownValue), "UNKNOWN_VALUE");
    }
}
