mod cli;
mod commands;
mod errors;
mod files;

use std::process::ExitCode;

use clap::Parser;
use log::error;

use queryable_core::ErrorResponse;

use cli::{QueryableCli, QueryableCliCommand};
use errors::CliError;

fn main() -> ExitCode {
    let cli = QueryableCli::parse();
    initialize_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::QueryError(e)) => {
            error!("Query failed: {}", e);
            if let Err(e) = commands::json_output(&ErrorResponse::from(&e)) {
                error!("{}", e);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: QueryableCli) -> Result<(), CliError> {
    let config = files::load_config(cli.config.as_deref())?;
    let data = files::load_data(&cli.data)?;

    match cli.command {
        QueryableCliCommand::Products { query } => commands::list_products(data, &config, &query),
        QueryableCliCommand::Articles { query } => commands::list_articles(data, &config, &query),
    }
}

fn initialize_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}
