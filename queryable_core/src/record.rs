//! Records the query adapter filters and orders

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::value::TypedValue;

/// Identifies a record within its domain
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names a field on a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A value stored in a record field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    String(String),
    Integer(i64),
    Float(f64),
    Currency(Money),
    DateTime(DateTime<FixedOffset>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns the type name of this value for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Boolean(_) => "Boolean",
            FieldValue::String(_) => "String",
            FieldValue::Integer(_) => "Integer",
            FieldValue::Float(_) => "Float",
            FieldValue::Currency(_) => "Currency",
            FieldValue::DateTime(_) => "DateTime",
            FieldValue::List(_) => "List",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Money> for FieldValue {
    fn from(value: Money) -> Self {
        FieldValue::Currency(value)
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<&TypedValue> for FieldValue {
    fn from(value: &TypedValue) -> Self {
        match value {
            TypedValue::Boolean(b) => FieldValue::Boolean(*b),
            TypedValue::Integer(i) => FieldValue::Integer(*i),
            TypedValue::Float(f) => FieldValue::Float(*f),
            TypedValue::String(s) => FieldValue::String(s.clone()),
        }
    }
}

/// A flat row of named fields plus typed attribute values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<FieldId, FieldValue>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, TypedValue>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_field(mut self, field: FieldId, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn with_attribute(mut self, slug: impl Into<String>, value: TypedValue) -> Self {
        self.attributes.insert(slug.into(), value);
        self
    }

    pub fn get_field(&self, field: &FieldId) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn get_attribute(&self, slug: &str) -> Option<&TypedValue> {
        self.attributes.get(slug)
    }
}
