//! Category filters that match whole subtrees

use std::sync::Arc;

use crate::QueryError;
use crate::category::{CategoryNode, CategoryTree};
use crate::query::{Condition, FieldRef, FilterOperator, Operand};

const SLUG_SEPARATOR: char = ',';

/// A selection of categories from a shared tree
#[derive(Debug, Clone)]
pub struct HierarchicalFilter {
    tree: Arc<CategoryTree>,
    selected: Vec<String>,
}

impl HierarchicalFilter {
    pub fn new(tree: Arc<CategoryTree>) -> Self {
        Self {
            tree,
            selected: Vec::new(),
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn nodes(&self) -> Vec<CategoryNode> {
        self.tree.nodes()
    }

    /// Select the categories named in `slug1,slug2`. Hidden categories
    /// count as unknown.
    pub fn set_selected_values(&self, raw: &str) -> Result<Self, QueryError> {
        let mut selected: Vec<String> = Vec::new();
        for slug in raw.split(SLUG_SEPARATOR).map(str::trim).filter(|s| !s.is_empty()) {
            if !self.tree.is_visible(slug) {
                return Err(QueryError::invalid_value("", slug, "a known category"));
            }
            if !selected.iter().any(|s| s == slug) {
                selected.push(slug.to_string());
            }
        }

        if selected.is_empty() {
            return Err(QueryError::invalid_value("", raw, "at least one category"));
        }

        Ok(Self {
            tree: Arc::clone(&self.tree),
            selected,
        })
    }

    /// Selected categories plus their visible descendants, without repeats.
    pub fn expanded(&self) -> Vec<String> {
        let mut slugs: Vec<String> = Vec::new();
        for slug in &self.selected {
            for descendant in self.tree.descendants_of(slug) {
                if self.tree.is_visible(&descendant) && !slugs.contains(&descendant) {
                    slugs.push(descendant);
                }
            }
        }
        slugs
    }

    /// The record's category list shares a slug with the expanded selection.
    pub fn condition(&self, field: FieldRef) -> Condition {
        Condition::compare(
            field,
            FilterOperator::In,
            Operand::List(self.expanded().into_iter().map(Operand::String).collect()),
        )
    }
}

impl PartialEq for HierarchicalFilter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree) && self.selected == other.selected
    }
}
