#![warn(
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

//! Fact extraction from note documents.
//!
//! Two sources feed the fact corpus: data/content line pairs, rendered as a
//! markdown table, and JSON objects embedded anywhere in the text.

pub mod json;
pub mod regions;
pub mod table;

pub use json::{JsonExtraction, JsonSpan, extract_facts, extract_json_objects, flatten, pretty_print};
pub use regions::{
    json_region, json_region_body, render_json_region, replace_json_region, replace_table,
    table_region,
};
pub use table::{TableBuild, TableRenderer, build_facts, parse_table_rows};
