#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;
mod sink;

use command::{
    CommandStrategy, InfoStrategy, InitStrategy, JsonStrategy, NotesInput, NotesStrategy,
    QueryInput, QueryStrategy, TableStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "fieldnotes")]
#[command(about = "Analyst notes with inline fact lookup", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive note session
    Notes {
        /// Raw input to build the table and JSON region from
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Render the fact table for a raw input file
    Table {
        /// File with alternating data and content lines
        file: PathBuf,
    },
    /// Extract and flatten the JSON objects in a file
    Json {
        /// File containing JSON objects anywhere in its text
        file: PathBuf,
    },
    /// Search the facts of a raw input file
    Query {
        /// File with line pairs and/or JSON objects
        file: PathBuf,

        /// Case-insensitive key fragment
        term: String,
    },
    /// Initialize configuration
    Init,
    /// Show effective configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Notes { input } => NotesStrategy.execute(NotesInput { input }).await,
        Commands::Table { file } => TableStrategy.execute(file).await,
        Commands::Json { file } => JsonStrategy.execute(file).await,
        Commands::Query { file, term } => QueryStrategy.execute(QueryInput { file, term }).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
