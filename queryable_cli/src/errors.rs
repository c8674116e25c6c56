use std::fmt;

use queryable_core::QueryError;

/// Failures that end a CLI run with a non-zero exit code
#[derive(Debug)]
pub enum CliError {
    /// The data or config file could not be read or parsed
    FileError(String),
    /// The listing rejected the request or was misconfigured
    QueryError(QueryError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError(message) => write!(f, "{}", message),
            CliError::QueryError(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for CliError {}

impl From<QueryError> for CliError {
    fn from(error: QueryError) -> Self {
        CliError::QueryError(error)
    }
}
