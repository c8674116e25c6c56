//! Listing configuration

use serde::Deserialize;

use crate::QueryError;

/// Limits and URLs shared by every domain listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Prefix for pagination links, e.g. `https://shop.example/api`
    pub base_url: String,
    pub default_per_page: usize,
    pub max_per_page: usize,
    /// Rows per sequential chunk when importing
    pub chunk_size: usize,
    /// Rows per parallel slice within a chunk
    pub chunk_slice_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            default_per_page: 15,
            max_per_page: 100,
            chunk_size: 100,
            chunk_slice_size: 20,
        }
    }
}

impl QueryConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(content: &str) -> Result<Self, QueryError> {
        serde_json::from_str(content)
            .map_err(|e| QueryError::configuration(format!("invalid listing configuration: {}", e)))
    }

    /// Full path used in pagination links for a listing.
    pub fn path(&self, listing: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), listing)
    }
}
