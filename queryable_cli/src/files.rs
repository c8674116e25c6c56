use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use queryable_core::QueryConfig;
use queryable_core::domain::catalog::CatalogData;
use queryable_core::domain::news::Article;

use crate::errors::CliError;

/// Contents of the JSON data file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataFile {
    pub catalog: CatalogData,
    pub articles: Vec<Article>,
}

pub fn load_data(path: &Path) -> Result<DataFile, CliError> {
    let data: DataFile = read_json(path)?;
    debug!(
        "Loaded {} products and {} articles from {}",
        data.catalog.products.len(),
        data.articles.len(),
        path.display()
    );
    Ok(data)
}

/// Read the listing configuration, falling back to defaults without a file.
pub fn load_config(path: Option<&Path>) -> Result<QueryConfig, CliError> {
    let Some(path) = path else {
        return Ok(QueryConfig::default());
    };
    let config = QueryConfig::from_json(&read_file(path)?)?;
    debug!("Loaded listing configuration from {}", path.display());
    Ok(config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    parse_json(&read_file(path)?)
        .map_err(|e| CliError::FileError(format!("Failed to parse {}: {}", path.display(), e)))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::FileError(format!("Failed to read {}: {}", path.display(), e)))
}

fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(content)
}
