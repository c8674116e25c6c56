//! JSON response envelope for listings and errors

use serde::Serialize;

use crate::QueryError;
use crate::filter::FilterEntry;
use crate::query::{Page, PaginationLinks, PaginationMeta};
use crate::sort::SortEntry;

/// What a request could have asked for and what it did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySection<T> {
    pub applied: Vec<T>,
    pub allowed: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMetadata {
    pub filter: QuerySection<FilterEntry>,
    pub sort: QuerySection<SortEntry>,
}

/// `{data, links, meta, query}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope<T> {
    pub data: Vec<T>,
    pub links: PaginationLinks,
    pub meta: PaginationMeta,
    pub query: QueryMetadata,
}

impl<T> ResponseEnvelope<T> {
    pub fn new(page: Page<T>, path: &str, query: QueryMetadata) -> Self {
        let links = page.links(path);
        let meta = page.meta(path);
        Self {
            data: page.items,
            links,
            meta,
            query,
        }
    }
}

/// `{message, status}` for a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
}

impl From<&QueryError> for ErrorResponse {
    fn from(error: &QueryError) -> Self {
        Self {
            message: error.to_string(),
            status: error.status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PageRequest;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let page = Page::slice(vec!["a", "b", "c"], PageRequest { page: 1, per_page: 2 });
        let envelope = ResponseEnvelope::new(
            page,
            "/articles",
            QueryMetadata {
                filter: QuerySection {
                    applied: vec![],
                    allowed: vec![],
                },
                sort: QuerySection {
                    applied: vec![SortEntry {
                        query: "TITLE".to_string(),
                        title: "Title".to_string(),
                    }],
                    allowed: vec![],
                },
            },
        );

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "data": ["a", "b"],
                "links": {
                    "first": "/articles?page=1",
                    "last": "/articles?page=2",
                    "prev": null,
                    "next": "/articles?page=2"
                },
                "meta": {
                    "current_page": 1,
                    "from": 1,
                    "last_page": 2,
                    "path": "/articles",
                    "per_page": 2,
                    "to": 2,
                    "total": 3
                },
                "query": {
                    "filter": {"applied": [], "allowed": []},
                    "sort": {"applied": [{"query": "TITLE", "title": "Title"}], "allowed": []}
                }
            })
        );
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::from(&QueryError::MissingFilter("CURRENCY".to_string()));
        assert_eq!(response.status, 422);
        assert_eq!(response.message, "The filter.CURRENCY field is required");
    }
}
