//! List comparison logic for conditions

use super::types::{FilterOperator, Operand};
use super::{compare_value, type_mismatch, unsupported_operator};
use crate::QueryError;
use crate::record::FieldValue;

/// Compare a list field value against an operand
pub fn compare_list(
    field_value: &FieldValue,
    operator: &FilterOperator,
    operand: &Operand,
) -> Result<bool, QueryError> {
    let items = match field_value {
        FieldValue::List(items) => items,
        _ => return Err(type_mismatch(field_value, operand)),
    };

    match operator {
        FilterOperator::Contains => {
            // Strings match on substring, everything else on equality
            for item in items {
                let item_operator = match (item, operand) {
                    (FieldValue::String(_), Operand::String(_)) => FilterOperator::Contains,
                    _ => FilterOperator::Equal,
                };
                if compare_value(item, &item_operator, operand)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        FilterOperator::Equal => match operand {
            Operand::List(other_items) => {
                if items.len() != other_items.len() {
                    return Ok(false);
                }
                for (item, other) in items.iter().zip(other_items) {
                    if !compare_value(item, &FilterOperator::Equal, other)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Err(type_mismatch(field_value, operand)),
        },
        _ => Err(unsupported_operator(field_value, operator, &["contains", "==", "in"])),
    }
}
