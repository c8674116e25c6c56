//! Error types for filter resolution and query execution

use std::fmt;

/// Errors that can occur while declaring, resolving or executing a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Raw input could not be coerced into the declared type
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },
    /// A filter value was looked up for a key that was never validated
    UnknownFilterKey(String),
    /// The request used filter keys the domain does not declare
    InvalidFilterQuery {
        unknown: Vec<String>,
        allowed: Vec<String>,
    },
    /// The request used a sort key the domain does not declare
    InvalidSortQuery { unknown: String, allowed: Vec<String> },
    /// A filter the domain requires was not supplied
    MissingFilter(String),
    /// A domain declared its filters or sorts inconsistently
    Configuration(String),
    /// Operator is not supported for the given field type
    UnsupportedOperator {
        field_type: String,
        operator: String,
        supported: Vec<String>,
    },
    /// Operand type doesn't match the field type
    TypeMismatch {
        field_type: String,
        filter_type: String,
    },
}

impl QueryError {
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        QueryError::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        QueryError::Configuration(message.into())
    }

    /// Attaches a parameter key to an `InvalidValue` raised without one.
    pub fn with_key(self, key: &str) -> Self {
        match self {
            QueryError::InvalidValue {
                key: existing,
                value,
                expected,
            } if existing.is_empty() => QueryError::InvalidValue {
                key: key.to_string(),
                value,
                expected,
            },
            other => other,
        }
    }

    /// HTTP-equivalent status for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            QueryError::InvalidValue { .. } | QueryError::MissingFilter(_) => 422,
            QueryError::InvalidFilterQuery { .. } | QueryError::InvalidSortQuery { .. } => 400,
            QueryError::UnknownFilterKey(_)
            | QueryError::Configuration(_)
            | QueryError::UnsupportedOperator { .. }
            | QueryError::TypeMismatch { .. } => 500,
        }
    }

    /// Whether the error was caused by client input rather than a programming fault.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidValue {
                key,
                value,
                expected,
            } => {
                if key.is_empty() {
                    write!(f, "Invalid value '{}': expected {}", value, expected)
                } else {
                    write!(
                        f,
                        "The {} value '{}' is invalid: expected {}",
                        key, value, expected
                    )
                }
            }
            QueryError::UnknownFilterKey(key) => {
                write!(f, "Filter '{}' was not part of the validated input", key)
            }
            QueryError::InvalidFilterQuery { unknown, allowed } => {
                write!(
                    f,
                    "Requested filter(s) `{}` are not allowed. Allowed filter(s) are `{}`",
                    unknown.join(", "),
                    allowed.join(", ")
                )
            }
            QueryError::InvalidSortQuery { unknown, allowed } => {
                write!(
                    f,
                    "Requested sort `{}` is not allowed. Allowed sort(s) are `{}`",
                    unknown,
                    allowed.join(", ")
                )
            }
            QueryError::MissingFilter(key) => write!(f, "The filter.{} field is required", key),
            QueryError::Configuration(message) => write!(f, "Invalid query configuration: {}", message),
            QueryError::UnsupportedOperator {
                field_type,
                operator,
                supported,
            } => {
                write!(
                    f,
                    "Cannot use '{}' operator on {} fields. Supported: {}",
                    operator,
                    field_type,
                    supported.join(", ")
                )
            }
            QueryError::TypeMismatch {
                field_type,
                filter_type,
            } => {
                write!(
                    f,
                    "Type mismatch: {} field cannot be compared with {} value",
                    field_type, filter_type
                )
            }
        }
    }
}

impl std::error::Error for QueryError {}
