//! Record ordering logic for queries

use std::cmp::Ordering;

use super::condition::{FieldRef, resolve_field};
use crate::record::{FieldValue, Record};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One ordering key
#[derive(Debug, Clone, PartialEq)]
pub struct OrderKey {
    pub field: FieldRef,
    pub direction: SortDirection,
}

impl OrderKey {
    pub fn asc(field: FieldRef) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: FieldRef) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// The ordering a sort compiles to
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OrderSpec {
    /// Keep the order the source produced (relevance)
    #[default]
    Natural,
    /// Order by the keys in priority order
    By(Vec<OrderKey>),
}

impl OrderSpec {
    pub fn by(key: OrderKey) -> Self {
        OrderSpec::By(vec![key])
    }

    pub fn then(self, key: OrderKey) -> Self {
        match self {
            OrderSpec::Natural => OrderSpec::By(vec![key]),
            OrderSpec::By(mut keys) => {
                keys.push(key);
                OrderSpec::By(keys)
            }
        }
    }

    pub fn keys(&self) -> &[OrderKey] {
        match self {
            OrderSpec::Natural => &[],
            OrderSpec::By(keys) => keys,
        }
    }
}

/// Compare two records by a list of keys, falling through on ties
pub fn compare_records(a: &Record, b: &Record, keys: &[OrderKey]) -> Ordering {
    for key in keys {
        let ordering = compare_records_by_field(a, b, &key.field, key.direction);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Compare two records by a single field
pub fn compare_records_by_field(
    a: &Record,
    b: &Record,
    field: &FieldRef,
    direction: SortDirection,
) -> Ordering {
    let a_value = resolve_field(a, field);
    let b_value = resolve_field(b, field);

    // Missing values sort to the end regardless of direction
    match (a_value, b_value) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_val), Some(b_val)) => {
            let ordering = compare_field_values(&a_val, &b_val);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

/// Compare two field values for sorting
fn compare_field_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    use FieldValue::*;

    match (a, b) {
        (Boolean(a), Boolean(b)) => a.cmp(b),
        (Integer(a), Integer(b)) => a.cmp(b),
        (Float(a), Float(b)) => compare_floats(*a, *b),
        (Integer(a), Float(b)) => compare_floats(*a as f64, *b),
        (Float(a), Integer(b)) => compare_floats(*a, *b as f64),
        (String(a), String(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (DateTime(a), DateTime(b)) => a.cmp(b),
        (Currency(a), Currency(b)) => {
            if a.is_comparable(b) {
                a.amount().cmp(&b.amount())
            } else {
                // Different currencies: order by code for a stable result
                a.currency().code().cmp(b.currency().code())
            }
        }
        (List(a), List(b)) => {
            for (a_item, b_item) in a.iter().zip(b.iter()) {
                match compare_field_values(a_item, b_item) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            a.len().cmp(&b.len())
        }
        _ => type_order(a).cmp(&type_order(b)),
    }
}

/// NaN sorts after every number
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

fn type_order(value: &FieldValue) -> u8 {
    match value {
        FieldValue::Boolean(_) => 0,
        FieldValue::Integer(_) | FieldValue::Float(_) => 1,
        FieldValue::String(_) => 2,
        FieldValue::DateTime(_) => 3,
        FieldValue::Currency(_) => 4,
        FieldValue::List(_) => 5,
    }
}
