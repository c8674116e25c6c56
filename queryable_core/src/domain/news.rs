//! News articles

use chrono::{DateTime, FixedOffset};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::QueryError;
use crate::config::QueryConfig;
use crate::envelope::ResponseEnvelope;
use crate::filter::{
    AllowedFilter, ExactFilter, FilterBuilder, FilterKind, FilterService, FilterSet, FilterValue,
};
use crate::listing::run_listing;
use crate::params::QueryParams;
use crate::query::{Condition, FieldRef, FilterOperator, OrderKey, OrderSpec};
use crate::record::{FieldId, Record, RecordId};
use crate::sort::{AllowedSort, SortService, SortSet};

pub const ARTICLES_PATH: &str = "/articles";

const TITLE_FIELD: &str = "title";
const DESCRIPTION_FIELD: &str = "description";
const PUBLISHED_AT_FIELD: &str = "published_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleAllowedFilter {
    Title,
    Description,
}

impl AllowedFilter for ArticleAllowedFilter {
    fn key(&self) -> &'static str {
        match self {
            ArticleAllowedFilter::Title => "TITLE",
            ArticleAllowedFilter::Description => "DESCRIPTION",
        }
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Exact
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleAllowedSort {
    PublishedAtDesc,
    PublishedAt,
    TitleDesc,
    Title,
    Default,
}

impl AllowedSort for ArticleAllowedSort {
    fn key(&self) -> &'static str {
        match self {
            ArticleAllowedSort::PublishedAtDesc => "PUBLISHED_AT_DESC",
            ArticleAllowedSort::PublishedAt => "PUBLISHED_AT",
            ArticleAllowedSort::TitleDesc => "TITLE_DESC",
            ArticleAllowedSort::Title => "TITLE",
            ArticleAllowedSort::Default => "DEFAULT",
        }
    }

    fn title(&self) -> String {
        let title = match self {
            ArticleAllowedSort::PublishedAtDesc => "Newest First",
            ArticleAllowedSort::PublishedAt => "Oldest First",
            ArticleAllowedSort::TitleDesc => "Reverse Alphabetical",
            ArticleAllowedSort::Title => "Alphabetical",
            ArticleAllowedSort::Default => "Relevance",
        };
        title.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: DateTime<FixedOffset>,
}

impl Article {
    fn to_record(&self) -> Record {
        Record::new(RecordId::new(self.slug.as_str()))
            .with_field(FieldId::new(TITLE_FIELD), self.title.as_str())
            .with_field(FieldId::new(DESCRIPTION_FIELD), self.description.as_str())
            .with_field(FieldId::new(PUBLISHED_AT_FIELD), self.published_at)
    }
}

#[derive(Debug, Clone, Default)]
pub struct News {
    articles: Vec<Article>,
    records: Vec<Record>,
}

impl News {
    pub fn new(articles: Vec<Article>) -> Self {
        let records = articles.iter().map(Article::to_record).collect();
        Self { articles, records }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn filters(&self) -> Result<FilterSet<ArticleAllowedFilter>, QueryError> {
        let filters = FilterService::<ArticleAllowedFilter>::new(&ArticleFilterBuilder)
            .add_search_filter(ArticleAllowedFilter::Title, |filter| {
                Ok(Condition::compare(
                    FieldRef::field(TITLE_FIELD),
                    FilterOperator::Contains,
                    filter.selected_text()?,
                ))
            })?
            .add_filter(ArticleAllowedFilter::Description, |filter| {
                Ok(Condition::compare(
                    FieldRef::field(DESCRIPTION_FIELD),
                    FilterOperator::Contains,
                    filter.selected_text()?,
                ))
            })?
            .build();
        Ok(filters)
    }

    pub fn sorts() -> Result<SortSet<ArticleAllowedSort>, QueryError> {
        let published_at = || FieldRef::field(PUBLISHED_AT_FIELD);
        let title = || FieldRef::field(TITLE_FIELD);

        SortService::new()
            .add_default_sort(
                ArticleAllowedSort::PublishedAtDesc,
                OrderSpec::by(OrderKey::desc(published_at())),
            )
            .add_sort(
                ArticleAllowedSort::PublishedAt,
                OrderSpec::by(OrderKey::asc(published_at())),
            )
            .add_sort(ArticleAllowedSort::TitleDesc, OrderSpec::by(OrderKey::desc(title())))
            .add_sort(ArticleAllowedSort::Title, OrderSpec::by(OrderKey::asc(title())))
            .add_default_search_sort(ArticleAllowedSort::Default, OrderSpec::Natural)
            .build()
    }

    pub fn index(
        &self,
        params: &QueryParams,
        config: &QueryConfig,
    ) -> Result<ResponseEnvelope<Article>, QueryError> {
        let listing = run_listing(
            &self.records,
            None,
            self.filters()?,
            Self::sorts()?,
            params,
            config,
        )?;

        let page = listing.page.try_map(|record| {
            self.articles
                .iter()
                .find(|a| a.slug == record.id.as_str())
                .cloned()
                .ok_or_else(|| {
                    QueryError::configuration(format!("no article for record '{}'", record.id))
                })
        })?;

        debug!("Listing {} articles", page.items.len());
        Ok(ResponseEnvelope::new(
            page,
            &config.path(ARTICLES_PATH),
            listing.query,
        ))
    }
}

struct ArticleFilterBuilder;

impl FilterBuilder<ArticleAllowedFilter> for ArticleFilterBuilder {
    fn build(&self, _filter: ArticleAllowedFilter) -> Result<FilterValue, QueryError> {
        Ok(FilterValue::Exact(ExactFilter::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_titles_come_from_keys() {
        assert_eq!(ArticleAllowedFilter::Description.title(), "Description");
        assert_eq!(ArticleAllowedSort::PublishedAtDesc.title(), "Newest First");
    }

    #[test]
    fn test_sort_set_is_well_formed() {
        let sorts = News::sorts().unwrap();
        assert_eq!(sorts.keys().len(), 5);
        assert!(sorts.get(ArticleAllowedSort::Default).unwrap().is_search_default);
        assert!(sorts.get(ArticleAllowedSort::PublishedAtDesc).unwrap().is_default);
    }

    #[test]
    fn test_title_is_the_search_filter() {
        let filters = News::default().filters().unwrap();
        assert_eq!(filters.get_search_filter().map(|f| f.key()), Some("TITLE"));
    }
}
