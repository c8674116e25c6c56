//! DateTime comparison logic for conditions

use super::types::{FilterOperator, Operand};
use super::{type_mismatch, unsupported_operator};
use crate::QueryError;
use crate::record::FieldValue;

const SUPPORTED_OPS: [&str; 6] = ["==", "!=", ">", "<", ">=", "<="];

/// Compare a datetime field value against a datetime operand
pub fn compare_datetime(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    let (value, other) = match (field_value, operand) {
        (FieldValue::DateTime(value), Operand::DateTime(other)) => (value, other),
        _ => return Err(type_mismatch(field_value, operand)),
    };

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
