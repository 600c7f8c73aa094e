//! Case-file persistence for finished notes.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use fieldnotes_core::{CaseLabels, DocumentSink, SinkError};
use tracing::info;

/// Writes notes to `<root>/<Month YYYY>/<subject>_<alert>_<MM-DD-YYYY>.md`.
#[derive(Debug, Clone)]
pub struct CaseFileSink {
    root: PathBuf,
}

impl CaseFileSink {
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Target path for a note saved on `date`.
    #[must_use]
    pub fn path_for(&self, labels: &CaseLabels, date: NaiveDate) -> PathBuf {
        let month = date.format("%B %Y").to_string();
        let file = format!(
            "{}_{}_{}.md",
            file_component(&labels.subject),
            file_component(&labels.alert),
            date.format("%m-%d-%Y")
        );
        self.root.join(month).join(file)
    }

    fn write_on(
        &self,
        text: &str,
        labels: &CaseLabels,
        date: NaiveDate,
    ) -> Result<PathBuf, SinkError> {
        labels.validate()?;
        let path = self.path_for(labels, date);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, format!("{}\n\n{text}", labels.reference_link.trim()))?;
        info!("Saved note to {}", path.display());
        Ok(path)
    }
}

impl DocumentSink for CaseFileSink {
    fn write(&self, text: &str, labels: &CaseLabels) -> Result<PathBuf, SinkError> {
        self.write_on(text, labels, Local::now().date_naive())
    }
}

/// Path separators in a label would escape the month folder.
fn file_component(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn scratch_root(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fieldnotes-{name}-{}", std::process::id()))
    }

    #[test]
    fn test_path_layout() {
        let sink = CaseFileSink::new(PathBuf::from("/cases"));
        let labels = CaseLabels::new("acme", "beacon", "https://ticket/1");
        assert_eq!(
            sink.path_for(&labels, date(2024, 3, 7)),
            PathBuf::from("/cases/March 2024/acme_beacon_03-07-2024.md")
        );
    }

    #[test]
    fn test_separators_do_not_escape_month_folder() {
        let sink = CaseFileSink::new(PathBuf::from("/cases"));
        let labels = CaseLabels::new("a/b", "c\\d", "x");
        assert_eq!(
            sink.path_for(&labels, date(2024, 1, 2)),
            PathBuf::from("/cases/January 2024/a-b_c-d_01-02-2024.md")
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_write_prefixes_reference_link() {
        let root = scratch_root("write");
        let sink = CaseFileSink::new(root.clone());
        let labels = CaseLabels::new("acme", "beacon", "https://ticket/1");

        let path = sink
            .write_on("host \"web01\"\n", &labels, date(2024, 3, 7))
            .expect("write succeeds");
        let content = fs::read_to_string(&path).expect("file readable");
        assert_eq!(content, "https://ticket/1\n\nhost \"web01\"\n");

        fs::remove_dir_all(root).expect("cleanup");
    }

    #[test]
    fn test_missing_label_writes_nothing() {
        let root = scratch_root("missing");
        let sink = CaseFileSink::new(root.clone());
        let labels = CaseLabels::new("acme", "", "https://ticket/1");

        let result = sink.write_on("text", &labels, date(2024, 3, 7));
        assert!(matches!(result, Err(SinkError::MissingLabel("alert"))));
        assert!(!root.exists());
    }
}
