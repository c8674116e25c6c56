//! Boolean comparison logic for conditions

use super::types::{FilterOperator, Operand};
use super::{type_mismatch, unsupported_operator};
use crate::QueryError;
use crate::record::FieldValue;

/// Compare a boolean field value against an operand
pub fn compare_boolean(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    let (value, other) = match (field_value, operand) {
        (FieldValue::Boolean(value), Operand::Boolean(other)) => (*value, *other),
        _ => return Err(type_mismatch(field_value, operand)),
    };

    match operator {
        FilterOperator::Equal => Ok(value == other),
        FilterOperator::NotEqual => Ok(value != other),
        _ => Err(unsupported_operator(field_value, operator, &["==", "!="])),
    }
}
