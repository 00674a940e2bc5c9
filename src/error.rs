use rust_decimal::Decimal;
use std::fmt;

/// Tag identifying which validation rule rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    EmptyField,
    NonPositiveValue,
    InvalidFormat,
    InvalidLength,
    EmptyCollection,
    InvalidEnumValue,
    OutOfRange,
}

impl ValidationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationErrorKind::EmptyField => "empty-field",
            ValidationErrorKind::NonPositiveValue => "non-positive-value",
            ValidationErrorKind::InvalidFormat => "invalid-format",
            ValidationErrorKind::InvalidLength => "invalid-length",
            ValidationErrorKind::EmptyCollection => "empty-collection",
            ValidationErrorKind::InvalidEnumValue => "invalid-enum-value",
            ValidationErrorKind::OutOfRange => "out-of-range",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection of malformed input at construction time.
///
/// Every value object either builds completely or returns one of these;
/// there is no partially initialised state.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be greater than 0, got {value}")]
    NonPositiveValue { field: &'static str, value: Decimal },
    #[error("{field} must contain only digits, got {value:?}")]
    InvalidFormat { field: &'static str, value: String },
    #[error("{field} must be 10 or 12 digits long, got {len}")]
    InvalidLength { field: &'static str, len: usize },
    #[error("{field} must contain at least one item")]
    EmptyCollection { field: &'static str },
    #[error("{value:?} is not a valid {type_name}")]
    InvalidEnumValue {
        type_name: &'static str,
        value: String,
    },
    #[error("{field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: String,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::EmptyField { .. } => ValidationErrorKind::EmptyField,
            ValidationError::NonPositiveValue { .. } => ValidationErrorKind::NonPositiveValue,
            ValidationError::InvalidFormat { .. } => ValidationErrorKind::InvalidFormat,
            ValidationError::InvalidLength { .. } => ValidationErrorKind::InvalidLength,
            ValidationError::EmptyCollection { .. } => ValidationErrorKind::EmptyCollection,
            ValidationError::InvalidEnumValue { .. } => ValidationErrorKind::InvalidEnumValue,
            ValidationError::OutOfRange { .. } => ValidationErrorKind::OutOfRange,
        }
    }
}

/// Failures raised by the REST wrappers on top of transport errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("legal entity client requires both inn and display name")]
    LegalEntityIncomplete,
    #[error("unexpected response from {path}: {reason}")]
    UnexpectedResponse { path: String, reason: String },
}
