//! Filter registry: declare, build, then resolve once per request

use std::fmt;

use log::{debug, error, warn};

use super::{AllowedFilter, Filter, FilterEntry, FilterValue};
use crate::QueryError;
use crate::envelope::QuerySection;
use crate::params::QueryParams;
use crate::query::{Condition, QueryBuilder};

/// Compiles an applied filter into a condition on the underlying query.
pub type FilterCallback = Box<dyn Fn(&Filter) -> Result<Condition, QueryError> + Send + Sync>;

/// Supplies the allowed value of each filter from the domain's data:
/// options, price bounds, available attribute values, the category tree.
pub trait FilterBuilder<F: AllowedFilter> {
    fn build(&self, filter: F) -> Result<FilterValue, QueryError>;
}

struct Registration<F> {
    filter: F,
    value: Filter,
    callback: FilterCallback,
}

impl<F: fmt::Debug> fmt::Debug for Registration<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("filter", &self.filter)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Filters being declared for one request
pub struct FilterService<'a, F: AllowedFilter> {
    builder: &'a dyn FilterBuilder<F>,
    registrations: Vec<Registration<F>>,
    search_filter: Option<F>,
}

impl<'a, F: AllowedFilter> FilterService<'a, F> {
    pub fn new(builder: &'a dyn FilterBuilder<F>) -> Self {
        Self {
            builder,
            registrations: Vec::new(),
            search_filter: None,
        }
    }

    /// Register a filter and the condition it compiles to.
    /// A later registration with the same key replaces the earlier one in place.
    pub fn add_filter(
        mut self,
        filter: F,
        callback: impl Fn(&Filter) -> Result<Condition, QueryError> + Send + Sync + 'static,
    ) -> Result<Self, QueryError> {
        self.register(filter, Box::new(callback))?;
        Ok(self)
    }

    /// Register the filter that marks a request as a search.
    pub fn add_search_filter(
        mut self,
        filter: F,
        callback: impl Fn(&Filter) -> Result<Condition, QueryError> + Send + Sync + 'static,
    ) -> Result<Self, QueryError> {
        if let Some(existing) = self.search_filter {
            if existing.key() != filter.key() {
                return Err(QueryError::configuration(format!(
                    "'{}' is already the search filter, cannot also designate '{}'",
                    existing.key(),
                    filter.key()
                )));
            }
        }

        self.search_filter = Some(filter);
        self.register(filter, Box::new(callback))?;
        Ok(self)
    }

    fn register(&mut self, filter: F, callback: FilterCallback) -> Result<(), QueryError> {
        let mut definition = filter.definition();
        definition.is_search_filter = self.search_filter.is_some_and(|s| s.key() == filter.key());
        let value = Filter::new(definition, self.builder.build(filter)?)?;

        let registration = Registration {
            filter,
            value,
            callback,
        };

        match self
            .registrations
            .iter()
            .position(|r| r.filter.key() == filter.key())
        {
            Some(index) => {
                warn!(
                    "Filter '{}' was registered twice, keeping the later registration",
                    filter.key()
                );
                self.registrations[index] = registration;
            }
            None => {
                debug!("Registered {} filter '{}'", filter.kind(), filter.key());
                self.registrations.push(registration);
            }
        }
        Ok(())
    }

    pub fn build(self) -> FilterSet<F> {
        debug!("Built filter set with {} filters", self.registrations.len());
        FilterSet {
            registrations: self.registrations,
            search_filter: self.search_filter,
        }
    }
}

impl<F: AllowedFilter> fmt::Debug for FilterService<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterService")
            .field("registrations", &self.registrations)
            .field("search_filter", &self.search_filter)
            .finish_non_exhaustive()
    }
}

/// The complete set of filters a domain allows
#[derive(Debug)]
pub struct FilterSet<F: AllowedFilter> {
    registrations: Vec<Registration<F>>,
    search_filter: Option<F>,
}

impl<F: AllowedFilter> FilterSet<F> {
    /// Allowed filters in registration order.
    pub fn allowed(&self) -> impl Iterator<Item = &Filter> {
        self.registrations.iter().map(|r| &r.value)
    }

    pub fn callbacks(&self) -> impl Iterator<Item = (&str, &FilterCallback)> {
        self.registrations
            .iter()
            .map(|r| (r.filter.key(), &r.callback))
    }

    /// The allowed value of the search filter, if one was designated.
    pub fn get_search_filter(&self) -> Option<&Filter> {
        let search = self.search_filter?;
        self.registrations
            .iter()
            .find(|r| r.filter.key() == search.key())
            .map(|r| &r.value)
    }

    pub fn keys(&self) -> Vec<String> {
        self.registrations
            .iter()
            .map(|r| r.filter.key().to_string())
            .collect()
    }

    /// Reject `filter[...]` keys that are not declared.
    pub fn validate(&self, params: &QueryParams) -> Result<(), QueryError> {
        let unknown: Vec<String> = params
            .filter
            .keys()
            .filter(|key| !self.registrations.iter().any(|r| r.filter.key() == key.as_str()))
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            debug!("Rejecting unknown filter keys: {:?}", unknown);
            Err(QueryError::InvalidFilterQuery {
                unknown,
                allowed: self.keys(),
            })
        }
    }

    /// Validate the request and bind every supplied filter to its value.
    pub fn resolve(self, params: &QueryParams) -> Result<ResolvedFilters<F>, QueryError> {
        self.validate(params)?;

        let mut applied = Vec::new();
        for registration in &self.registrations {
            let Some(param) = params.get_filter(registration.filter.key()) else {
                continue;
            };
            let value = registration.value.select(param)?;
            let condition = (registration.callback)(&value)?;
            applied.push(AppliedFilter {
                filter: registration.filter,
                value,
                condition,
            });
        }

        debug!(
            "Resolved {} of {} filters",
            applied.len(),
            self.registrations.len()
        );

        Ok(ResolvedFilters {
            allowed: self.registrations.into_iter().map(|r| r.value).collect(),
            applied,
            search_filter: self.search_filter,
        })
    }
}

/// A filter taken from the request together with its compiled condition
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedFilter<F> {
    pub filter: F,
    pub value: Filter,
    pub condition: Condition,
}

/// Filters bound to one request's input
#[derive(Debug, Clone)]
pub struct ResolvedFilters<F: AllowedFilter> {
    allowed: Vec<Filter>,
    applied: Vec<AppliedFilter<F>>,
    search_filter: Option<F>,
}

impl<F: AllowedFilter> ResolvedFilters<F> {
    pub fn allowed(&self) -> &[Filter] {
        &self.allowed
    }

    /// Applied filters in declaration order.
    pub fn applied(&self) -> &[AppliedFilter<F>] {
        &self.applied
    }

    /// The applied value of a filter.
    ///
    /// Reading a filter the request did not supply is a programming error.
    pub fn get(&self, filter: F) -> Result<&Filter, QueryError> {
        self.applied
            .iter()
            .find(|a| a.filter.key() == filter.key())
            .map(|a| &a.value)
            .ok_or_else(|| {
                error!("Filter '{}' was read but not validated", filter.key());
                QueryError::UnknownFilterKey(filter.key().to_string())
            })
    }

    pub fn is_applied(&self, filter: F) -> bool {
        self.applied.iter().any(|a| a.filter.key() == filter.key())
    }

    /// The applied value of the search filter, if the request searched.
    pub fn get_search_filter(&self) -> Option<&Filter> {
        self.search_filter.and_then(|search| self.get(search).ok())
    }

    pub fn is_searching(&self) -> bool {
        self.search_filter.is_some_and(|search| self.is_applied(search))
    }

    /// Narrow the query by every applied filter's condition.
    pub fn apply(&self, query: &mut dyn QueryBuilder) {
        for applied in &self.applied {
            query.where_condition(applied.condition.clone());
        }
    }

    pub fn to_query_section(&self) -> QuerySection<FilterEntry> {
        QuerySection {
            applied: self.applied.iter().map(|a| a.value.to_applied()).collect(),
            allowed: self.allowed.iter().map(Filter::to_allowed).collect(),
        }
    }
}
