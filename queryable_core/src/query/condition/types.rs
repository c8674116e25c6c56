//! Condition type definitions

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::money::Money;
use crate::record::FieldId;
use crate::value::TypedValue;

/// Reference to something a condition or ordering can read from a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
    /// The record's own id
    Id,
    /// A named record field
    Field(FieldId),
    /// A typed attribute, addressed by slug
    Attribute(String),
}

impl FieldRef {
    pub fn field(id: impl Into<String>) -> Self {
        FieldRef::Field(FieldId::new(id))
    }

    pub fn attribute(slug: impl Into<String>) -> Self {
        FieldRef::Attribute(slug.into())
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Id => f.write_str("@id"),
            FieldRef::Field(id) => write!(f, "{}", id),
            FieldRef::Attribute(slug) => write!(f, "attribute.{}", slug),
        }
    }
}

/// Comparison operators for conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    Contains,
    StartsWith,
    EndsWith,
    In,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            FilterOperator::Equal => "==",
            FilterOperator::NotEqual => "!=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::LessThan => "<",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::LessOrEqual => "<=",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::In => "in",
        };
        f.write_str(symbol)
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Currency(Money),
    DateTime(DateTime<FixedOffset>),
    List(Vec<Operand>),
}

impl Operand {
    /// Returns the type name of this operand for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::String(_) => "String",
            Operand::Integer(_) => "Integer",
            Operand::Float(_) => "Float",
            Operand::Boolean(_) => "Boolean",
            Operand::Currency(_) => "Currency",
            Operand::DateTime(_) => "DateTime",
            Operand::List(_) => "List",
        }
    }
}

impl From<&TypedValue> for Operand {
    fn from(value: &TypedValue) -> Self {
        match value {
            TypedValue::Boolean(b) => Operand::Boolean(*b),
            TypedValue::Integer(i) => Operand::Integer(*i),
            TypedValue::Float(f) => Operand::Float(*f),
            TypedValue::String(s) => Operand::String(s.clone()),
        }
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::String(value.to_string())
    }
}

impl From<Money> for Operand {
    fn from(value: Money) -> Self {
        Operand::Currency(value)
    }
}
