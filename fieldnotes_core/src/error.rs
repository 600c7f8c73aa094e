use thiserror::Error;

/// Failure while turning document text into facts.
///
/// Every variant is local to one piece of input; extraction keeps going.
#[derive(Debug, Error)]
pub enum FactError {
    #[error("invalid JSON in {span:?}: {source}")]
    InvalidJson {
        span: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FactError {
    /// The offending input text.
    #[must_use]
    pub fn span(&self) -> &str {
        match self {
            Self::InvalidJson { span, .. } => span,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("trigger {0:?} must not be whitespace or a digit")]
    InvalidTrigger(char),

    #[error("result cap {0} must be between 1 and 9")]
    InvalidResultCap(usize),

    #[error("link template {0:?} has no {{target}} placeholder")]
    InvalidLinkTemplate(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("missing required label: {0}")]
    MissingLabel(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
