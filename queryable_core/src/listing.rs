//! The listing pipeline shared by every domain

use log::debug;

use crate::QueryError;
use crate::config::QueryConfig;
use crate::envelope::QueryMetadata;
use crate::filter::{AllowedFilter, FilterSet};
use crate::params::QueryParams;
use crate::query::{Condition, Page, PageRequest, QueryBuilder, RecordQuery};
use crate::record::Record;
use crate::sort::{AllowedSort, SortSet};

/// One page of matching records plus the query metadata for the envelope
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    pub page: Page<&'a Record>,
    pub query: QueryMetadata,
}

/// Validate the request, resolve filters and sort, run the query and paginate.
///
/// `base` narrows every listing regardless of the request and is not
/// reported in the query metadata.
pub fn run_listing<'a, F: AllowedFilter, S: AllowedSort>(
    records: &'a [Record],
    base: Option<Condition>,
    filters: FilterSet<F>,
    sorts: SortSet<S>,
    params: &QueryParams,
    config: &QueryConfig,
) -> Result<Listing<'a>, QueryError> {
    filters.validate(params)?;
    sorts.validate(params.sort.as_deref())?;

    let filters = filters.resolve(params)?;
    let sort = sorts.resolve(params.sort.as_deref(), filters.is_searching())?;

    let mut query = RecordQuery::new(records);
    if let Some(base) = base {
        query.where_condition(base);
    }
    filters.apply(&mut query);
    sort.apply(&mut query);

    let request = PageRequest::new(params.page, params.per_page, config);
    let page = query.paginate(request)?;

    debug!(
        "Listing matched {} records, returning page {} of {}",
        page.total,
        page.page,
        page.last_page()
    );

    Ok(Listing {
        page,
        query: QueryMetadata {
            filter: filters.to_query_section(),
            sort: sort.to_query_section(),
        },
    })
}
