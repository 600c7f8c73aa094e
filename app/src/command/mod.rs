//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type; `main`
//! dispatches to them without trait objects.

use std::path::Path;

use fieldnotes_config::Config;
use fieldnotes_core::SearchResult;
use fieldnotes_session::NoteSession;
use tracing::info;

mod info;
mod init;
mod json;
mod notes;
mod query;
mod table;
mod version;

pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use json::JsonStrategy;
pub use notes::{NotesInput, NotesStrategy};
pub use query::{QueryInput, QueryStrategy};
pub use table::TableStrategy;
pub use version::VersionStrategy;

/// One CLI command. `Input` carries the parsed arguments for that command.
///
/// ```ignore
/// impl CommandStrategy for TableStrategy {
///     type Input = PathBuf;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         let raw = read_input(&input)?;
///         // build and print
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Load config (or defaults) and open a session with it.
fn open_session() -> anyhow::Result<(Config, NoteSession)> {
    let config = Config::load_or_default()?;
    let session = NoteSession::new(config.query.clone(), config.links.clone())?;
    Ok((config, session))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    info!("Reading input from {}", path.display());
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))
}

fn print_results(results: &[SearchResult]) {
    for result in results {
        println!(
            "  {}. {}  ({})",
            result.rank, result.fact.value, result.fact.key
        );
    }
}
