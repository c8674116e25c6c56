//! Storage-agnostic conditions compiled from applied filters

mod boolean;
mod currency;
mod datetime;
mod list;
mod numeric;
mod string;
mod types;

pub use types::*;

use crate::QueryError;
use crate::record::{FieldValue, Record};

/// A predicate over records
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Compare one field against an operand
    Compare {
        field: FieldRef,
        operator: FilterOperator,
        value: Operand,
    },
    /// The field is present on the record
    Exists(FieldRef),
    /// Every child condition holds
    All(Vec<Condition>),
    /// At least one child condition holds
    Any(Vec<Condition>),
}

impl Condition {
    pub fn compare(field: FieldRef, operator: FilterOperator, value: impl Into<Operand>) -> Self {
        Condition::Compare {
            field,
            operator,
            value: value.into(),
        }
    }

    /// A condition every record satisfies.
    pub fn always() -> Self {
        Condition::All(Vec::new())
    }

    /// Check if a record matches this condition
    pub fn matches(&self, record: &Record) -> Result<bool, QueryError> {
        match self {
            Condition::Compare {
                field,
                operator,
                value,
            } => match resolve_field(record, field) {
                Some(field_value) => matches_value(&field_value, operator, value),
                // Field doesn't exist, condition fails
                None => Ok(false),
            },
            Condition::Exists(field) => Ok(resolve_field(record, field).is_some()),
            Condition::All(conditions) => {
                for condition in conditions {
                    if !condition.matches(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Any(conditions) => {
                for condition in conditions {
                    if condition.matches(record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

/// Read the value a field reference points at, if the record has it.
pub(crate) fn resolve_field(record: &Record, field: &FieldRef) -> Option<FieldValue> {
    match field {
        FieldRef::Id => Some(FieldValue::String(record.id.to_string())),
        FieldRef::Field(id) => record.get_field(id).cloned(),
        FieldRef::Attribute(slug) => record.get_attribute(slug).map(FieldValue::from),
    }
}

fn matches_value(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    if *operator != FilterOperator::In {
        return compare_value(field_value, operator, operand);
    }

    let candidates = match operand {
        Operand::List(items) => items,
        _ => return Err(type_mismatch(field_value, operand)),
    };

    let values: Vec<&FieldValue> = match field_value {
        FieldValue::List(items) => items.iter().collect(),
        single => vec![single],
    };

    for value in values {
        for candidate in candidates {
            if compare_value(value, &FilterOperator::Equal, candidate)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Compare a field value by delegating to the type-specific comparator
fn compare_value(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    match field_value {
        FieldValue::String(_) => string::compare_string(field_value, operator, operand),
        FieldValue::Integer(_) => numeric::compare_integer(field_value, operator, operand),
        FieldValue::Float(_) => numeric::compare_float(field_value, operator, operand),
        FieldValue::Boolean(_) => boolean::compare_boolean(field_value, operator, operand),
        FieldValue::Currency(_) => currency::compare_currency(field_value, operator, operand),
        FieldValue::DateTime(_) => datetime::compare_datetime(field_value, operator, operand),
        FieldValue::List(_) => list::compare_list(field_value, operator, operand),
    }
}

fn type_mismatch(field_value: &FieldValue, operand: &Operand) -> QueryError {
    QueryError::TypeMismatch {
        field_type: field_value.type_name().to_string(),
        filter_type: operand.type_name().to_string(),
    }
}

fn unsupported_operator(
    field_value: &FieldValue,
    operator: &FilterOperator,
    supported: &[&str],
) -> QueryError {
    QueryError::UnsupportedOperator {
        field_type: field_value.type_name().to_string(),
        operator: operator.to_string(),
        supported: supported.iter().map(|s| s.to_string()).collect(),
    }
}
