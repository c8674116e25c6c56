//! Declarative filters: definitions, typed values and their registry
//!
//! A domain declares its filters with an [`AllowedFilter`] enum. Each filter
//! has a kind that decides how raw input is interpreted:
//! - Exact: one free-text value, optionally from a closed list of options
//! - Range: `min,max` bounds clamped into the domain's bounds
//! - Multiselect: per-attribute value lists coerced to the attribute's type
//! - Hierarchical: category slugs matching whole subtrees

mod exact;
mod hierarchical;
mod multiselect;
mod range;
mod service;

pub use exact::*;
pub use hierarchical::*;
pub use multiselect::*;
pub use range::*;
pub use service::*;

use std::fmt;

use convert_case::{Case, Casing};
use iso_currency::Currency;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::QueryError;
use crate::category::CategoryNode;
use crate::params::{FILTER_KEY, FilterParam};

/// How a filter interprets its raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilterKind {
    #[serde(rename = "input")]
    Exact,
    #[serde(rename = "range")]
    Range,
    #[serde(rename = "multiselect")]
    Multiselect,
    #[serde(rename = "hierarchical")]
    Hierarchical,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Exact => "input",
            FilterKind::Range => "range",
            FilterKind::Multiselect => "multiselect",
            FilterKind::Hierarchical => "hierarchical",
        };
        f.write_str(name)
    }
}

/// The closed set of filters one domain accepts.
pub trait AllowedFilter: Copy + fmt::Debug + Eq + Send + Sync + 'static {
    /// The `filter[KEY]` name.
    fn key(&self) -> &'static str;

    fn kind(&self) -> FilterKind;

    /// Display title. Defaults to the key in title case.
    fn title(&self) -> String {
        self.key().to_case(Case::Title)
    }

    fn definition(&self) -> FilterDefinition {
        FilterDefinition {
            key: self.key().to_string(),
            title: self.title(),
            kind: self.kind(),
            is_search_filter: false,
        }
    }
}

/// A declared, named filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDefinition {
    pub key: String,
    pub title: String,
    pub kind: FilterKind,
    pub is_search_filter: bool,
}

/// The value carried by a filter, one variant per kind
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Exact(ExactFilter),
    Range(RangeFilter),
    Multiselect(MultiselectFilter),
    Hierarchical(HierarchicalFilter),
}

impl FilterValue {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterValue::Exact(_) => FilterKind::Exact,
            FilterValue::Range(_) => FilterKind::Range,
            FilterValue::Multiselect(_) => FilterKind::Multiselect,
            FilterValue::Hierarchical(_) => FilterKind::Hierarchical,
        }
    }
}

/// A filter definition bound to its current value.
///
/// When allowed, the value describes what can be selected (options, bounds,
/// available attribute values, the category tree). Once applied, it holds
/// what the request selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub definition: FilterDefinition,
    pub value: FilterValue,
}

impl Filter {
    pub fn new(definition: FilterDefinition, value: FilterValue) -> Result<Self, QueryError> {
        if definition.kind != value.kind() {
            return Err(QueryError::configuration(format!(
                "filter '{}' is declared as {} but was given a {} value",
                definition.key,
                definition.kind,
                value.kind()
            )));
        }
        Ok(Self { definition, value })
    }

    pub fn key(&self) -> &str {
        &self.definition.key
    }

    pub fn kind(&self) -> FilterKind {
        self.definition.kind
    }

    /// Bind raw request input, returning the applied filter.
    pub fn set_selected(&self, param: &FilterParam) -> Result<Filter, QueryError> {
        let value = match (&self.value, param) {
            (FilterValue::Exact(exact), FilterParam::Value(raw)) => {
                FilterValue::Exact(exact.set_selected_value(raw)?)
            }
            (FilterValue::Range(range), FilterParam::Value(raw)) => {
                let (min, max) = RangeFilter::parse_selected(raw)?;
                FilterValue::Range(range.set_selected_values(min, max))
            }
            (FilterValue::Hierarchical(tree), FilterParam::Value(raw)) => {
                FilterValue::Hierarchical(tree.set_selected_values(raw)?)
            }
            (FilterValue::Multiselect(multiselect), FilterParam::Nested(selected)) => {
                FilterValue::Multiselect(multiselect.set_selected_values(selected)?)
            }
            (_, param) => {
                let expected = match self.kind() {
                    FilterKind::Multiselect => "filter[KEY][name]=v1,v2",
                    _ => "filter[KEY]=value",
                };
                return Err(QueryError::invalid_value("", param.shape(), expected));
            }
        };

        Ok(Filter {
            definition: self.definition.clone(),
            value,
        })
    }

    /// Bind raw request input, naming the parameter in any error.
    pub(crate) fn select(&self, param: &FilterParam) -> Result<Filter, QueryError> {
        self.set_selected(param)
            .map_err(|e| e.with_key(&format!("{}.{}", FILTER_KEY, self.key())))
    }

    pub fn as_exact(&self) -> Result<&ExactFilter, QueryError> {
        match &self.value {
            FilterValue::Exact(exact) => Ok(exact),
            other => Err(self.kind_mismatch(other)),
        }
    }

    pub fn as_range(&self) -> Result<&RangeFilter, QueryError> {
        match &self.value {
            FilterValue::Range(range) => Ok(range),
            other => Err(self.kind_mismatch(other)),
        }
    }

    pub fn as_multiselect(&self) -> Result<&MultiselectFilter, QueryError> {
        match &self.value {
            FilterValue::Multiselect(multiselect) => Ok(multiselect),
            other => Err(self.kind_mismatch(other)),
        }
    }

    pub fn as_hierarchical(&self) -> Result<&HierarchicalFilter, QueryError> {
        match &self.value {
            FilterValue::Hierarchical(tree) => Ok(tree),
            other => Err(self.kind_mismatch(other)),
        }
    }

    /// The selected text of an applied exact filter.
    pub fn selected_text(&self) -> Result<&str, QueryError> {
        self.as_exact()?.value().ok_or_else(|| {
            QueryError::configuration(format!("filter '{}' has no selected value", self.key()))
        })
    }

    fn kind_mismatch(&self, value: &FilterValue) -> QueryError {
        QueryError::configuration(format!(
            "filter '{}' holds a {} value",
            self.key(),
            value.kind()
        ))
    }

    /// Entry for the `allowed` section of the envelope.
    pub fn to_allowed(&self) -> FilterEntry {
        let details = match &self.value {
            FilterValue::Exact(exact) if exact.options().is_empty() => FilterDetails::Empty {},
            FilterValue::Exact(exact) => FilterDetails::Options {
                options: exact.options().to_vec(),
            },
            FilterValue::Range(range) => FilterDetails::range(range),
            FilterValue::Multiselect(multiselect) => FilterDetails::Attributes {
                values: multiselect.values().to_vec(),
            },
            FilterValue::Hierarchical(tree) => FilterDetails::Categories {
                values: tree.nodes(),
            },
        };
        self.entry(details)
    }

    /// Entry for the `applied` section of the envelope.
    pub fn to_applied(&self) -> FilterEntry {
        let details = match &self.value {
            FilterValue::Exact(exact) => match exact.value() {
                Some(value) => FilterDetails::Value {
                    value: value.to_string(),
                },
                None => FilterDetails::Empty {},
            },
            FilterValue::Range(range) => FilterDetails::range(range),
            FilterValue::Multiselect(multiselect) => FilterDetails::Attributes {
                values: multiselect.values().to_vec(),
            },
            FilterValue::Hierarchical(tree) => FilterDetails::Selected {
                values: tree.selected().to_vec(),
            },
        };
        self.entry(details)
    }

    fn entry(&self, details: FilterDetails) -> FilterEntry {
        FilterEntry {
            query: self.definition.key.clone(),
            title: self.definition.title.clone(),
            kind: self.definition.kind,
            details,
        }
    }
}

/// One filter in the `query.filter` section: `{query, title, type, ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterEntry {
    pub query: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: FilterKind,
    #[serde(flatten)]
    pub details: FilterDetails,
}

/// The kind-specific fields of a [`FilterEntry`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterDetails {
    Range {
        #[serde(with = "rust_decimal::serde::float_option")]
        min_value: Option<Decimal>,
        #[serde(with = "rust_decimal::serde::float_option")]
        max_value: Option<Decimal>,
        #[serde(serialize_with = "serialize_currency_code")]
        currency: Option<Currency>,
    },
    Options {
        options: Vec<String>,
    },
    Value {
        value: String,
    },
    Attributes {
        values: Vec<NestedValues>,
    },
    Categories {
        values: Vec<CategoryNode>,
    },
    Selected {
        values: Vec<String>,
    },
    Empty {},
}

impl FilterDetails {
    fn range(range: &RangeFilter) -> Self {
        FilterDetails::Range {
            min_value: range.min_value(),
            max_value: range.max_value(),
            currency: range.currency(),
        }
    }
}

fn serialize_currency_code<S>(currency: &Option<Currency>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match currency {
        Some(currency) => serializer.serialize_some(currency.code()),
        None => serializer.serialize_none(),
    }
}
