//! Listing commands: parse the query, run it and print the envelope.

use log::info;
use serde::Serialize;

use queryable_core::batch::ChunkOptions;
use queryable_core::domain::catalog::Catalog;
use queryable_core::domain::news::News;
use queryable_core::{QueryConfig, QueryParams};

use crate::errors::CliError;
use crate::files::DataFile;

/// Lists products matching a raw query string.
pub fn list_products(data: DataFile, config: &QueryConfig, query: &str) -> Result<(), CliError> {
    let params = QueryParams::parse(query)?;
    let catalog = Catalog::from_data(data.catalog, ChunkOptions::from_config(config)?)?;

    let envelope = catalog.index(&params, config)?;
    info!(
        "Listed {} of {} products",
        envelope.data.len(),
        envelope.meta.total
    );
    json_output(&envelope)
}

/// Lists news articles matching a raw query string.
pub fn list_articles(data: DataFile, config: &QueryConfig, query: &str) -> Result<(), CliError> {
    let params = QueryParams::parse(query)?;
    let news = News::new(data.articles);

    let envelope = news.index(&params, config)?;
    info!(
        "Listed {} of {} articles",
        envelope.data.len(),
        envelope.meta.total
    );
    json_output(&envelope)
}

pub(crate) fn json_output<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::FileError(format!("Failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}
