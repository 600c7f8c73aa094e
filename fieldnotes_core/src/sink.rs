//! Destination for finished notes.

use std::path::PathBuf;

use crate::error::SinkError;

/// Labels written alongside a finished note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseLabels {
    pub subject: String,
    pub alert: String,
    pub reference_link: String,
}

impl CaseLabels {
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        alert: impl Into<String>,
        reference_link: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            alert: alert.into(),
            reference_link: reference_link.into(),
        }
    }

    /// All three labels are required and must not be blank.
    pub fn validate(&self) -> Result<(), SinkError> {
        if self.subject.trim().is_empty() {
            return Err(SinkError::MissingLabel("subject"));
        }
        if self.alert.trim().is_empty() {
            return Err(SinkError::MissingLabel("alert"));
        }
        if self.reference_link.trim().is_empty() {
            return Err(SinkError::MissingLabel("reference link"));
        }
        Ok(())
    }
}

/// Writes finished document text somewhere durable.
pub trait DocumentSink {
    /// Persist `text` and return where it went.
    fn write(&self, text: &str, labels: &CaseLabels) -> Result<PathBuf, SinkError>;
}
