//! Multiselect filters over typed attribute values

use std::collections::BTreeMap;

use serde::Serialize;

use crate::QueryError;
use crate::query::{Condition, FieldRef, FilterOperator, Operand};
use crate::value::{TypedValue, ValueType};

const VALUE_SEPARATOR: char = ',';

/// Public description of an attribute: `{query, title, type}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    #[serde(rename = "query")]
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl AttributeDescriptor {
    pub fn new(slug: &str, title: &str, value_type: ValueType) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            value_type,
        }
    }
}

/// An attribute together with a set of its values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedValues {
    pub attribute: AttributeDescriptor,
    pub values: Vec<TypedValue>,
}

impl NestedValues {
    pub fn new(attribute: AttributeDescriptor, values: Vec<TypedValue>) -> Self {
        Self { attribute, values }
    }

    /// Coerce one raw value to the attribute's declared type.
    pub fn adjust_value_type(&self, raw: &str) -> Result<TypedValue, QueryError> {
        self.attribute.value_type.coerce(raw)
    }

    /// Replace the values with the coerced, de-duplicated items of `v1,v2,...`.
    pub fn with_selected(&self, raw: &str) -> Result<Self, QueryError> {
        let mut values: Vec<TypedValue> = Vec::new();
        for item in raw.split(VALUE_SEPARATOR).map(str::trim) {
            if item.is_empty() {
                continue;
            }
            let value = self.adjust_value_type(item)?;
            if !values.contains(&value) {
                values.push(value);
            }
        }

        if values.is_empty() {
            return Err(QueryError::invalid_value(
                "",
                raw,
                format!("at least one {} value", self.attribute.value_type),
            ));
        }

        Ok(Self::new(self.attribute.clone(), values))
    }

    /// The attribute holds any of the values.
    pub fn condition(&self) -> Condition {
        Condition::compare(
            FieldRef::attribute(self.attribute.slug.clone()),
            FilterOperator::In,
            Operand::List(self.values.iter().map(Operand::from).collect()),
        )
    }
}

/// Several attributes, each with several values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiselectFilter {
    values: Vec<NestedValues>,
}

impl MultiselectFilter {
    pub fn new(values: Vec<NestedValues>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[NestedValues] {
        &self.values
    }

    /// Select values per attribute slug.
    ///
    /// Selected attributes keep the order of this filter, not of the request.
    pub fn set_selected_values(&self, selected: &BTreeMap<String, String>) -> Result<Self, QueryError> {
        if let Some(unknown) = selected
            .keys()
            .find(|slug| !self.values.iter().any(|nested| &nested.attribute.slug == *slug))
        {
            let known: Vec<&str> = self.values.iter().map(|n| n.attribute.slug.as_str()).collect();
            return Err(QueryError::invalid_value(
                "",
                unknown.as_str(),
                format!("one of {}", known.join(", ")),
            ));
        }

        let values = self
            .values
            .iter()
            .filter_map(|nested| {
                selected
                    .get(&nested.attribute.slug)
                    .map(|raw| nested.with_selected(raw))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { values })
    }

    /// Every attribute must hold one of its selected values.
    pub fn condition(&self) -> Condition {
        Condition::All(self.values.iter().map(NestedValues::condition).collect())
    }
}
