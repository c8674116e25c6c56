//! Raw request parameters: `filter[...]`, `sort`, `page` and `per_page`

use std::collections::BTreeMap;

use log::debug;

use crate::QueryError;

pub const FILTER_KEY: &str = "filter";
pub const SORT_KEY: &str = "sort";
pub const PAGE_KEY: &str = "page";
pub const PER_PAGE_KEY: &str = "per_page";

/// The raw value supplied for one filter key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterParam {
    /// `filter[KEY]=value`
    Value(String),
    /// `filter[KEY][slug]=value`
    Nested(BTreeMap<String, String>),
}

impl FilterParam {
    /// Human readable name of the parameter shape for validation messages.
    pub fn shape(&self) -> &'static str {
        match self {
            FilterParam::Value(_) => "a single value",
            FilterParam::Nested(_) => "a nested object",
        }
    }
}

/// The request's query parameters, before validation against a domain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub filter: BTreeMap<String, FilterParam>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl QueryParams {
    /// Parse a URL query string such as
    /// `filter[PRICE_BETWEEN]=10,500&filter[ATTRIBUTE][width]=20,30&sort=PRICE`.
    ///
    /// Parameters outside the listing vocabulary are ignored, and empty
    /// filter values count as absent.
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.trim_start_matches('?'))
            .map_err(|e| QueryError::invalid_value("query", query, format!("a URL query string ({})", e)))?;

        let mut params = QueryParams::default();
        for (key, value) in pairs {
            params.insert(&key, value)?;
        }

        debug!(
            "Parsed query params: {} filters, sort={:?}",
            params.filter.len(),
            params.sort
        );
        Ok(params)
    }

    fn insert(&mut self, key: &str, value: String) -> Result<(), QueryError> {
        match split_brackets(key) {
            Some((root, path)) if root == FILTER_KEY => match path.as_slice() {
                [filter_key] => self.insert_filter_value(filter_key, value),
                [filter_key, nested_key] => self.insert_nested_value(filter_key, nested_key, value),
                _ => Err(QueryError::invalid_value(key, value, "filter[KEY] or filter[KEY][name]")),
            },
            Some(_) => Ok(()),
            None => {
                match key {
                    SORT_KEY if !value.trim().is_empty() => self.sort = Some(value.trim().to_string()),
                    PAGE_KEY => self.page = Some(crate::PageRequest::parse_param(key, &value)?),
                    PER_PAGE_KEY => self.per_page = Some(crate::PageRequest::parse_param(key, &value)?),
                    _ => {}
                }
                Ok(())
            }
        }
    }

    fn insert_filter_value(&mut self, filter_key: &str, value: String) -> Result<(), QueryError> {
        if value.trim().is_empty() {
            return Ok(());
        }
        if let Some(FilterParam::Nested(_)) = self.filter.get(filter_key) {
            return Err(mixed_shapes(filter_key));
        }
        self.filter.insert(filter_key.to_string(), FilterParam::Value(value));
        Ok(())
    }

    fn insert_nested_value(
        &mut self,
        filter_key: &str,
        nested_key: &str,
        value: String,
    ) -> Result<(), QueryError> {
        if value.trim().is_empty() {
            return Ok(());
        }
        let entry = self
            .filter
            .entry(filter_key.to_string())
            .or_insert_with(|| FilterParam::Nested(BTreeMap::new()));
        match entry {
            FilterParam::Nested(values) => {
                values.insert(nested_key.to_string(), value);
                Ok(())
            }
            FilterParam::Value(_) => Err(mixed_shapes(filter_key)),
        }
    }

    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filter
            .insert(key.to_string(), FilterParam::Value(value.to_string()));
        self
    }

    pub fn with_nested_filter(mut self, key: &str, nested_key: &str, value: &str) -> Self {
        let entry = self
            .filter
            .entry(key.to_string())
            .or_insert_with(|| FilterParam::Nested(BTreeMap::new()));
        if let FilterParam::Nested(values) = entry {
            values.insert(nested_key.to_string(), value.to_string());
        }
        self
    }

    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    pub fn with_page(mut self, page: usize, per_page: usize) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    pub fn get_filter(&self, key: &str) -> Option<&FilterParam> {
        self.filter.get(key)
    }
}

fn mixed_shapes(filter_key: &str) -> QueryError {
    QueryError::invalid_value(
        format!("{}.{}", FILTER_KEY, filter_key),
        "mixed values",
        "either a single value or a nested object",
    )
}

/// Split `root[a][b]` into `("root", ["a", "b"])`. Plain keys return `None`.
fn split_brackets(key: &str) -> Option<(&str, Vec<&str>)> {
    let open = key.find('[')?;
    let root = &key[..open];
    let mut rest = &key[open..];
    let mut path = Vec::new();

    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        path.push(&inner[..close]);
        rest = &inner[close + 1..];
    }

    Some((root, path))
}
