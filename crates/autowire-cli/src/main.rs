mod cli;
mod commands;
mod config;
mod observability;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use autowire_graphql::{ComponentMap, SchemaError, build_executor};
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::output::print_error;

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist - it's optional
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    let cli = Cli::parse();
    let log = observability::init_tracing("warn");

    let cfg = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            print_error(&format!("Configuration error: {e}"));
            std::process::exit(2);
        }
    };
    if let Err(e) = log.set_level(&cfg.logging.level) {
        tracing::warn!(error = ?e, "Keeping default log level");
    }
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    tracing::info!(
        path = %config_path.display(),
        strategy = ?cfg.graphql.strategy,
        "Configuration loaded"
    );

    if let Err(e) = run(&cli, cfg).await {
        print_error(&format!("{e:#}"));
        let code = match e.downcast_ref::<SchemaError>() {
            Some(SchemaError::Configuration(_)) => 2,
            _ => 1,
        };
        std::process::exit(code);
    }
}

async fn run(cli: &Cli, cfg: AppConfig) -> Result<()> {
    let mut graphql = cfg.graphql;
    if let Some(strategy) = cli.strategy {
        graphql.strategy = strategy.into();
    }

    let components = match &cli.fixtures {
        Some(path) => commands::load_fixtures(path)?,
        None => ComponentMap::new(),
    };

    let assembled = build_executor(graphql, cli.schema_dir.as_deref(), &components)
        .context("failed to build GraphQL schema")?;

    match &cli.command {
        Commands::Check(args) => commands::check(&assembled, args)?,
        Commands::Query(args) => commands::query(&assembled, args).await?,
    }

    Ok(())
}
