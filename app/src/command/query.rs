use std::path::PathBuf;

/// Input parameters for the Query command strategy.
#[derive(Debug, Clone)]
pub struct QueryInput {
    /// Raw input with line pairs and/or JSON objects
    pub file: PathBuf,
    /// Key fragment to search for
    pub term: String,
}

/// Strategy for a one-shot search over the facts of a file.
///
/// Both the line pairs and the JSON objects of the file are loaded, exactly
/// as the Build Table and Parse JSON actions of a note session would.
#[derive(Debug, Clone, Copy)]
pub struct QueryStrategy;

impl super::CommandStrategy for QueryStrategy {
    type Input = QueryInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let raw = super::read_input(&input.file)?;
        let (_, mut session) = super::open_session()?;

        session.build_table(&raw);
        session.parse_json(&raw);

        let results = session.search(&input.term);
        if results.is_empty() {
            println!("No facts match {:?}", input.term);
        } else {
            super::print_results(&results);
        }
        Ok(())
    }
}
