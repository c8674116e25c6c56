//! String comparison logic for conditions

use super::types::{FilterOperator, Operand};
use super::{type_mismatch, unsupported_operator};
use crate::QueryError;
use crate::record::FieldValue;

const SUPPORTED_OPS: [&str; 5] = ["==", "!=", "contains", "starts_with", "ends_with"];

/// Compare a string field value against an operand, ignoring case
pub fn compare_string(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    let value = match field_value {
        FieldValue::String(s) => s.as_str(),
        _ => return Err(type_mismatch(field_value, operand)),
    };

    let needle = match operand {
        Operand::String(s) => s.as_str(),
        _ => return Err(type_mismatch(field_value, operand)),
    };

    match operator {
        FilterOperator::Equal => Ok(value.to_lowercase() == needle.to_lowercase()),
        FilterOperator::NotEqual => Ok(value.to_lowercase() != needle.to_lowercase()),
        FilterOperator::Contains => Ok(value.to_lowercase().contains(&needle.to_lowercase())),
        FilterOperator::StartsWith => {
            Ok(value.to_lowercase().starts_with(&needle.to_lowercase()))
        }
        FilterOperator::EndsWith => Ok(value.to_lowercase().ends_with(&needle.to_lowercase())),
        _ => Err(unsupported_operator(field_value, operator, &SUPPORTED_OPS)),
    }
}
