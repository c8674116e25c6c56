//! Sort registry with default and search-default selection

use log::{debug, warn};

use super::{AllowedSort, SortDefinition, SortEntry};
use crate::QueryError;
use crate::envelope::QuerySection;
use crate::query::{OrderSpec, QueryBuilder};

/// Sorts being declared for one request
#[derive(Debug)]
pub struct SortService<S: AllowedSort> {
    registrations: Vec<(S, SortDefinition)>,
}

impl<S: AllowedSort> Default for SortService<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AllowedSort> SortService<S> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    pub fn add_sort(self, sort: S, ordering: OrderSpec) -> Self {
        self.register(sort, ordering, false, false)
    }

    /// The sort used when the request names none and is not a search.
    pub fn add_default_sort(self, sort: S, ordering: OrderSpec) -> Self {
        self.register(sort, ordering, true, false)
    }

    /// The sort used when the request names none and is a search.
    pub fn add_default_search_sort(self, sort: S, ordering: OrderSpec) -> Self {
        self.register(sort, ordering, false, true)
    }

    fn register(mut self, sort: S, ordering: OrderSpec, is_default: bool, is_search_default: bool) -> Self {
        let definition = SortDefinition {
            key: sort.key().to_string(),
            title: sort.title(),
            ordering,
            is_default,
            is_search_default,
        };

        match self
            .registrations
            .iter()
            .position(|(registered, _)| registered.key() == sort.key())
        {
            Some(index) => {
                warn!(
                    "Sort '{}' was registered twice, keeping the later registration",
                    sort.key()
                );
                self.registrations[index] = (sort, definition);
            }
            None => {
                debug!("Registered sort '{}'", sort.key());
                self.registrations.push((sort, definition));
            }
        }
        self
    }

    /// Check there is exactly one default and one search default.
    pub fn build(self) -> Result<SortSet<S>, QueryError> {
        let defaults = self.count(|d| d.is_default);
        let search_defaults = self.count(|d| d.is_search_default);

        if defaults != 1 {
            return Err(QueryError::configuration(format!(
                "expected exactly one default sort, found {}",
                defaults
            )));
        }
        if search_defaults != 1 {
            return Err(QueryError::configuration(format!(
                "expected exactly one default search sort, found {}",
                search_defaults
            )));
        }

        debug!("Built sort set with {} sorts", self.registrations.len());
        Ok(SortSet {
            registrations: self.registrations,
        })
    }

    fn count(&self, predicate: impl Fn(&SortDefinition) -> bool) -> usize {
        self.registrations.iter().filter(|(_, d)| predicate(d)).count()
    }
}

/// The complete set of sorts a domain allows
#[derive(Debug, Clone)]
pub struct SortSet<S: AllowedSort> {
    registrations: Vec<(S, SortDefinition)>,
}

impl<S: AllowedSort> SortSet<S> {
    pub fn allowed(&self) -> impl Iterator<Item = &SortDefinition> {
        self.registrations.iter().map(|(_, d)| d)
    }

    pub fn keys(&self) -> Vec<String> {
        self.allowed().map(|d| d.key.clone()).collect()
    }

    pub fn get(&self, sort: S) -> Option<&SortDefinition> {
        self.allowed().find(|d| d.key == sort.key())
    }

    /// Reject a sort key that is not declared.
    pub fn validate(&self, requested: Option<&str>) -> Result<(), QueryError> {
        match requested {
            Some(key) if !self.allowed().any(|d| d.key == key) => Err(QueryError::InvalidSortQuery {
                unknown: key.to_string(),
                allowed: self.keys(),
            }),
            _ => Ok(()),
        }
    }

    /// Pick the effective sort: the requested one, else the search default
    /// while searching, else the default.
    pub fn resolve(self, requested: Option<&str>, searching: bool) -> Result<ResolvedSort<S>, QueryError> {
        self.validate(requested)?;

        let index = self
            .registrations
            .iter()
            .position(|(_, d)| match requested {
                Some(key) => d.key == key,
                None if searching => d.is_search_default,
                None => d.is_default,
            })
            .ok_or_else(|| QueryError::configuration("sort set has no default to fall back to"))?;

        let (sort, applied) = self.registrations[index].clone();
        debug!(
            "Resolved sort '{}' (requested: {:?}, searching: {})",
            applied.key, requested, searching
        );

        Ok(ResolvedSort {
            sort,
            applied,
            allowed: self.registrations.into_iter().map(|(_, d)| d).collect(),
        })
    }
}

/// The sort chosen for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSort<S> {
    sort: S,
    applied: SortDefinition,
    allowed: Vec<SortDefinition>,
}

impl<S: AllowedSort> ResolvedSort<S> {
    pub fn sort(&self) -> S {
        self.sort
    }

    pub fn applied(&self) -> &SortDefinition {
        &self.applied
    }

    pub fn allowed(&self) -> &[SortDefinition] {
        &self.allowed
    }

    pub fn apply(&self, query: &mut dyn QueryBuilder) {
        query.order_by(&self.applied.ordering);
    }

    pub fn to_query_section(&self) -> QuerySection<SortEntry> {
        QuerySection {
            applied: vec![self.applied.to_entry()],
            allowed: self.allowed.iter().map(SortDefinition::to_entry).collect(),
        }
    }
}
