use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Defines the top-level interface for the queryable CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "queryable")]
#[command(version, about = "Run catalog and news listing queries against a JSON data file.")]
pub struct QueryableCli {
    /// Path to the JSON data file with the catalog and articles.
    #[arg(short, long, global = true, env = "QUERYABLE_DATA", default_value = "data.json")]
    pub data: PathBuf,

    /// Path to a JSON listing configuration file.
    #[arg(short, long, global = true, env = "QUERYABLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: QueryableCliCommand,
}

/// Defines the listings the CLI can query.
#[derive(Subcommand, Debug, PartialEq)]
pub enum QueryableCliCommand {
    /// List products. `filter[CURRENCY]` is required.
    Products {
        /// Raw query string (e.g. "filter[CURRENCY]=USD&sort=PRICE_DESC")
        #[arg(default_value = "")]
        query: String,
    },
    /// List news articles.
    Articles {
        /// Raw query string (e.g. "filter[TITLE]=sale&page=2")
        #[arg(default_value = "")]
        query: String,
    },
}
