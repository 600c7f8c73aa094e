use std::path::PathBuf;

use fieldnotes_core::IndicatorClassifier;
use fieldnotes_extract::extract_facts;
use tracing::warn;

/// Strategy for extracting and flattening the JSON objects in a file.
///
/// Prints one `path = value` line per fact. Invalid objects are reported and
/// skipped.
#[derive(Debug, Clone, Copy)]
pub struct JsonStrategy;

impl super::CommandStrategy for JsonStrategy {
    type Input = PathBuf;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let raw = super::read_input(&input)?;
        let extraction = extract_facts(&raw, &IndicatorClassifier::new());

        for error in &extraction.errors {
            warn!("{error}");
        }
        for fact in &extraction.facts {
            println!("{} = {}", fact.key, fact.value);
        }

        if extraction.objects.is_empty() {
            anyhow::bail!("No valid JSON object found in {}", input.display());
        }
        Ok(())
    }
}
