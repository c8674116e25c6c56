//! Applying compiled conditions and orderings to an underlying query

use log::debug;

use super::condition::Condition;
use super::order::{OrderKey, OrderSpec, compare_records};
use super::pagination::{Page, PageRequest};
use crate::QueryError;
use crate::record::Record;

/// The seam between resolved filters/sorts and whatever executes the query.
pub trait QueryBuilder {
    /// Narrow the query by a condition. Conditions combine with AND.
    fn where_condition(&mut self, condition: Condition);

    /// Replace the query's ordering.
    fn order_by(&mut self, order: &OrderSpec);
}

/// An in-memory query over borrowed records
#[derive(Debug, Clone)]
pub struct RecordQuery<'a> {
    records: Vec<&'a Record>,
    conditions: Vec<Condition>,
    order: Vec<OrderKey>,
}

impl<'a> RecordQuery<'a> {
    pub fn new(records: impl IntoIterator<Item = &'a Record>) -> Self {
        Self {
            records: records.into_iter().collect(),
            conditions: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Run the query and return every matching record in order.
    pub fn execute(self) -> Result<Vec<&'a Record>, QueryError> {
        let mut matched = Vec::with_capacity(self.records.len());
        'records: for record in self.records {
            for condition in &self.conditions {
                if !condition.matches(record)? {
                    continue 'records;
                }
            }
            matched.push(record);
        }

        if !self.order.is_empty() {
            // Stable, so natural order breaks ties
            matched.sort_by(|a, b| compare_records(a, b, &self.order));
        }

        debug!(
            "Record query matched {} records with {} conditions",
            matched.len(),
            self.conditions.len()
        );
        Ok(matched)
    }

    /// Run the query and cut out the requested page.
    pub fn paginate(self, request: PageRequest) -> Result<Page<&'a Record>, QueryError> {
        Ok(Page::slice(self.execute()?, request))
    }
}

impl QueryBuilder for RecordQuery<'_> {
    fn where_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    fn order_by(&mut self, order: &OrderSpec) {
        self.order = order.keys().to_vec();
    }
}
