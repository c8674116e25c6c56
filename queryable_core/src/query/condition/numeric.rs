//! Numeric comparison logic for conditions (integer and float)

use super::types::{FilterOperator, Operand};
use super::{type_mismatch, unsupported_operator};
use crate::QueryError;
use crate::record::FieldValue;

const SUPPORTED_OPS: [&str; 6] = ["==", "!=", ">", "<", ">=", "<="];

/// Compare an integer field value against an operand
pub fn compare_integer(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    let value = match field_value {
        FieldValue::Integer(i) => *i,
        _ => return Err(type_mismatch(field_value, operand)),
    };

    match operand {
        Operand::Integer(other) => compare_ordered(field_value, &value, operator, other),
        Operand::Float(other) => compare_floats(field_value, value as f64, operator, *other),
        _ => Err(type_mismatch(field_value, operand)),
    }
}

/// Compare a float field value against an operand
pub fn compare_float(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    let value = match field_value {
        FieldValue::Float(f) => *f,
        _ => return Err(type_mismatch(field_value, operand)),
    };

    match operand {
        Operand::Float(other) => compare_floats(field_value, value, operator, *other),
        Operand::Integer(other) => compare_floats(field_value, value, operator, *other as f64),
        _ => Err(type_mismatch(field_value, operand)),
    }
}

fn compare_ordered<T: PartialOrd>(
    field_value: &FieldValue,
    value: &T,
    operator: &FilterOperator,
    other: &T,
) -> Result<bool, QueryError> {
    match operator {
        FilterOperator::Equal => Ok(value == other),
        FilterOperator::NotEqual => Ok(value != other),
        FilterOperator::GreaterThan => Ok(value > other),
        FilterOperator::LessThan => Ok(value < other),
        FilterOperator::GreaterOrEqual => Ok(value >= other),
        FilterOperator::LessOrEqual => Ok(value <= other),
        _ => Err(unsupported_operator(field_value, operator, &SUPPORTED_OPS)),
    }
}

fn compare_floats(
    field_value: &FieldValue,
    value: f64,
    operator: &FilterOperator,
    other: f64,
) -> Result<bool, QueryError> {
    match operator {
        FilterOperator::Equal => Ok((value - other).abs() < f64::EPSILON),
        FilterOperator::NotEqual => Ok((value - other).abs() >= f64::EPSILON),
        _ => compare_ordered(field_value, &value, operator, &other),
    }
}
