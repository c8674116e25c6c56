//! Currency comparison logic for conditions

use super::types::{FilterOperator, Operand};
use super::{type_mismatch, unsupported_operator};
use crate::QueryError;
use crate::record::FieldValue;

const SUPPORTED_OPS: [&str; 6] = ["==", "!=", ">", "<", ">=", "<="];

/// Compare a money field value against a money operand.
/// Amounts in different currencies never match.
pub fn compare_currency(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    let (value, other) = match (field_value, operand) {
        (FieldValue::Currency(value), Operand::Currency(other)) => (value, other),
        _ => return Err(type_mismatch(field_value, operand)),
    };

    if !value.is_comparable(other) {
        return Ok(false);
    }

    let (amount, other_amount) = (value.amount(), other.amount());
    match operator {
        FilterOperator::Equal => Ok(amount == other_amount),
        FilterOperator::NotEqual => Ok(amount != other_amount),
        FilterOperator::GreaterThan => Ok(amount > other_amount),
        FilterOperator::LessThan => Ok(amount < other_amount),
        FilterOperator::GreaterOrEqual => Ok(amount >= other_amount),
        FilterOperator::LessOrEqual => Ok(amount <= other_amount),
        _ => Err(unsupported_operator(field_value, operator, &SUPPORTED_OPS)),
    }
}
