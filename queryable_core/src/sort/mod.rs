//! Declarative sorts and their registry

mod service;

pub use service::*;

use std::fmt;

use convert_case::{Case, Casing};
use serde::Serialize;

use crate::query::OrderSpec;

/// The closed set of sorts one domain accepts.
pub trait AllowedSort: Copy + fmt::Debug + Eq + Send + Sync + 'static {
    /// The `sort=KEY` name.
    fn key(&self) -> &'static str;

    fn title(&self) -> String {
        self.key().to_case(Case::Title)
    }
}

/// A declared ordering and whether it is one of the defaults
#[derive(Debug, Clone, PartialEq)]
pub struct SortDefinition {
    pub key: String,
    pub title: String,
    pub ordering: OrderSpec,
    pub is_default: bool,
    pub is_search_default: bool,
}

impl SortDefinition {
    pub fn to_entry(&self) -> SortEntry {
        SortEntry {
            query: self.key.clone(),
            title: self.title.clone(),
        }
    }
}

/// One sort in the `query.sort` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortEntry {
    pub query: String,
    pub title: String,
}
