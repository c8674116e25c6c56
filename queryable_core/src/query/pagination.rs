//! Length-aware pagination of query results

use serde::Serialize;

use crate::QueryError;
use crate::config::QueryConfig;

/// Which slice of the results a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    /// Normalise raw `page`/`per_page` values against the configured limits.
    pub fn new(page: Option<usize>, per_page: Option<usize>, config: &QueryConfig) -> Self {
        let per_page = per_page
            .unwrap_or(config.default_per_page)
            .clamp(1, config.max_per_page.max(1));
        Self {
            page: page.unwrap_or(1).max(1),
            per_page,
        }
    }

    /// Parse a raw `page`/`per_page` parameter.
    pub fn parse_param(key: &str, raw: &str) -> Result<usize, QueryError> {
        raw.trim()
            .parse::<usize>()
            .map_err(|_| QueryError::invalid_value(key, raw, "a positive integer"))
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of results plus the total they were cut from
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Cut a page out of the full, ordered result list.
    pub fn slice(all: Vec<T>, request: PageRequest) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.per_page)
            .collect();
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
        }
    }

    pub fn last_page(&self) -> usize {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// 1-based position of the first item, if the page has any.
    pub fn from(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.page - 1) * self.per_page + 1)
        }
    }

    /// 1-based position of the last item, if the page has any.
    pub fn to(&self) -> Option<usize> {
        self.from().map(|from| from + self.items.len() - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        })
    }

    pub fn links(&self, path: &str) -> PaginationLinks {
        let url = |page: usize| format!("{}?page={}", path, page);
        let last_page = self.last_page();
        PaginationLinks {
            first: Some(url(1)),
            last: Some(url(last_page)),
            prev: (self.page > 1).then(|| url(self.page - 1)),
            next: (self.page < last_page).then(|| url(self.page + 1)),
        }
    }

    pub fn meta(&self, path: &str) -> PaginationMeta {
        PaginationMeta {
            current_page: self.page,
            from: self.from(),
            last_page: self.last_page(),
            path: path.to_string(),
            per_page: self.per_page,
            to: self.to(),
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationMeta {
    pub current_page: usize,
    pub from: Option<usize>,
    pub last_page: usize,
    pub path: String,
    pub per_page: usize,
    pub to: Option<usize>,
    pub total: usize,
}
