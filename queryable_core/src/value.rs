//! Typed values coerced from raw query parameters

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Literal accepted as boolean true.
pub const TRUE_LITERAL: &str = "true";
/// Literal accepted as boolean false.
pub const FALSE_LITERAL: &str = "false";

/// The declared type of an attribute's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
}

impl ValueType {
    /// Coerce a raw parameter value into this type.
    pub fn coerce(&self, raw: &str) -> Result<TypedValue, QueryError> {
        match self {
            ValueType::String => Ok(TypedValue::String(raw.to_string())),
            ValueType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(TypedValue::Integer)
                .map_err(|_| QueryError::invalid_value("", raw, self.as_str())),
            ValueType::Float => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(TypedValue::Float(value)),
                _ => Err(QueryError::invalid_value("", raw, self.as_str())),
            },
            ValueType::Boolean => match raw.trim() {
                TRUE_LITERAL => Ok(TypedValue::Boolean(true)),
                FALSE_LITERAL => Ok(TypedValue::Boolean(false)),
                _ => Err(QueryError::invalid_value(
                    "",
                    raw,
                    format!("'{}' or '{}'", TRUE_LITERAL, FALSE_LITERAL),
                )),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value whose type was decided by a declared `ValueType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl TypedValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedValue::Boolean(_) => ValueType::Boolean,
            TypedValue::Integer(_) => ValueType::Integer,
            TypedValue::Float(_) => ValueType::Float,
            TypedValue::String(_) => ValueType::String,
        }
    }

    /// Whether this value can be stored under an attribute of the given type.
    /// Integers are accepted where floats are declared.
    pub fn fits(&self, value_type: ValueType) -> bool {
        matches!(
            (self, value_type),
            (TypedValue::Boolean(_), ValueType::Boolean)
                | (TypedValue::Integer(_), ValueType::Integer)
                | (TypedValue::Integer(_), ValueType::Float)
                | (TypedValue::Float(_), ValueType::Float)
                | (TypedValue::String(_), ValueType::String)
        )
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Boolean(true) => f.write_str(TRUE_LITERAL),
            TypedValue::Boolean(false) => f.write_str(FALSE_LITERAL),
            TypedValue::Integer(value) => write!(f, "{}", value),
            TypedValue::Float(value) => write!(f, "{}", value),
            TypedValue::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::String(value.to_string())
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        TypedValue::Integer(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Float(value)
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}
