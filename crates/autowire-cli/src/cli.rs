use std::path::PathBuf;

use autowire_graphql::WiringMode;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "autowire")]
#[command(about = "Build and query convention-wired GraphQL schemas")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: autowire.toml)
    #[arg(short, long, global = true, env = "AUTOWIRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Schema directory (overrides graphql.schema_location)
    #[arg(short = 'd', long, global = true)]
    pub schema_dir: Option<PathBuf>,

    /// Wiring strategy (overrides graphql.strategy)
    #[arg(short, long, global = true)]
    pub strategy: Option<StrategyArg>,

    /// JSON file mapping component names to the value they return
    #[arg(long, global = true)]
    pub fixtures: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Bind operation fields to `<field>DataFetcher`
    OperationFields,
    /// Delegate types to `<type>TypeBuilder`, falling back to field wiring
    TypeBuilders,
}

impl From<StrategyArg> for WiringMode {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::OperationFields => WiringMode::OperationFields,
            StrategyArg::TypeBuilders => WiringMode::TypeBuilders,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the schema and print the wiring report
    Check(CheckArgs),
    /// Build the schema and execute one query against it
    Query(QueryArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Also print the assembled schema as SDL
    #[arg(long)]
    pub sdl: bool,
    /// Exit with an error if any component failed to initialise
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args)]
pub struct QueryArgs {
    /// GraphQL query document
    pub query: String,
    /// Variables as a JSON object
    #[arg(long)]
    pub variables: Option<String>,
    /// Root value as JSON; unbound operation fields read from it
    #[arg(long)]
    pub root: Option<String>,
    /// Operation to run when the document holds several
    #[arg(long)]
    pub operation: Option<String>,
}
