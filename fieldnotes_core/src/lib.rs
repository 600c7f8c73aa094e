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

pub mod classify;
pub mod document;
pub mod error;
pub mod fact;
pub mod options;
pub mod sink;

pub use classify::{Classification, ContentClassifier, IndicatorClassifier};
pub use document::Document;
pub use error::{ConfigError, EditError, FactError, SinkError};
pub use fact::{Category, Fact, FactCorpus, FactSource, SearchResult};
pub use options::{LinkConfig, QueryConfig};
pub use sink::{CaseLabels, DocumentSink};

/// Opening and closing marker of the embedded JSON region.
pub const JSON_SENTINEL: &str = "---JSON---";

/// First row of every rendered fact table.
pub const TABLE_HEADER: &str = "| Data | Content | Link |";

/// Separator row that follows [`TABLE_HEADER`].
pub const TABLE_SEPARATOR: &str = "| ---- | ------- | ---- |";
