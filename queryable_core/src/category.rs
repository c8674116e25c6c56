//! Category hierarchy backing hierarchical filters

use std::collections::HashMap;

use log::debug;
use petgraph::Direction;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};

use crate::QueryError;

/// A category as supplied by the surrounding persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Hidden categories hide their whole subtree
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl Category {
    pub fn new(slug: &str, title: &str, parent: Option<&str>) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            parent: parent.map(str::to_string),
            is_visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

/// A category and its children, as listed in the allowed filter section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub query: String,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

/// Parent -> child graph of categories
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    graph: DiGraph<Category, ()>,
    index: HashMap<String, NodeIndex>,
}

impl CategoryTree {
    /// Build the tree. Unknown parents, duplicate slugs and cycles are rejected.
    pub fn build(categories: Vec<Category>) -> Result<Self, QueryError> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        for category in categories {
            let slug = category.slug.clone();
            if index.contains_key(&slug) {
                return Err(QueryError::configuration(format!(
                    "category '{}' is declared twice",
                    slug
                )));
            }
            let node = graph.add_node(category);
            index.insert(slug, node);
        }

        let edges: Vec<(NodeIndex, NodeIndex)> = graph
            .node_indices()
            .filter_map(|child| {
                graph[child]
                    .parent
                    .as_ref()
                    .map(|parent| (parent.clone(), child))
            })
            .map(|(parent, child)| {
                index.get(&parent).map(|p| (*p, child)).ok_or_else(|| {
                    QueryError::configuration(format!(
                        "category '{}' has unknown parent '{}'",
                        graph[child].slug, parent
                    ))
                })
            })
            .collect::<Result<_, _>>()?;

        for (parent, child) in edges {
            graph.add_edge(parent, child, ());
        }

        if is_cyclic_directed(&graph) {
            return Err(QueryError::configuration("category hierarchy contains a cycle"));
        }

        debug!("Built category tree with {} categories", graph.node_count());
        Ok(Self { graph, index })
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    pub fn get(&self, slug: &str) -> Option<&Category> {
        self.index.get(slug).map(|node| &self.graph[*node])
    }

    /// A known category is visible when it and every ancestor are.
    pub fn is_visible(&self, slug: &str) -> bool {
        let mut current = self.get(slug);
        while let Some(category) = current {
            if !category.is_visible {
                return false;
            }
            match &category.parent {
                Some(parent) => current = self.get(parent),
                None => return true,
            }
        }
        false
    }

    /// Slugs of every visible category, in declaration order.
    pub fn visible_slugs(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|node| &self.graph[node].slug)
            .filter(|slug| self.is_visible(slug))
            .cloned()
            .collect()
    }

    /// The category itself followed by every category below it.
    pub fn descendants_of(&self, slug: &str) -> Vec<String> {
        let Some(start) = self.index.get(slug) else {
            return Vec::new();
        };

        let mut slugs = Vec::new();
        let mut dfs = Dfs::new(&self.graph, *start);
        while let Some(node) = dfs.next(&self.graph) {
            slugs.push(self.graph[node].slug.clone());
        }
        slugs
    }

    /// Every visible root with its visible subtree, in declaration order.
    pub fn nodes(&self) -> Vec<CategoryNode> {
        self.graph
            .node_indices()
            .filter(|node| {
                self.graph[*node].is_visible
                    && self
                        .graph
                        .neighbors_directed(*node, Direction::Incoming)
                        .next()
                        .is_none()
            })
            .map(|root| self.node(root))
            .collect()
    }

    fn node(&self, index: NodeIndex) -> CategoryNode {
        let category = &self.graph[index];
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .filter(|child| self.graph[*child].is_visible)
            .collect();
        // Neighbours come back newest edge first
        children.sort();
        CategoryNode {
            query: category.slug.clone(),
            title: category.title.clone(),
            children: children.into_iter().map(|child| self.node(child)).collect(),
        }
    }
}
