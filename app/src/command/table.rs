use std::path::PathBuf;

use tracing::warn;

/// Strategy for rendering the fact table of a raw input file.
#[derive(Debug, Clone, Copy)]
pub struct TableStrategy;

impl super::CommandStrategy for TableStrategy {
    type Input = PathBuf;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let raw = super::read_input(&input)?;
        let (_, mut session) = super::open_session()?;

        let build = session.build_table(&raw);
        if let Some(line) = &build.dropped_line {
            warn!("Ignoring unpaired trailing line: {line}");
        }

        print!("{}", session.document().text());
        Ok(())
    }
}
