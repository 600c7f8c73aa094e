//! Fact types shared by the extractor, the query engine and the selector.
//!
//! A fact is a key/value pair discovered in a note document, tagged with the
//! category the content classifier assigned to its value.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Classification tag attached to a fact value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Category {
    /// Plain content with no lookup link.
    #[default]
    None = 0,
    /// Looks like a security indicator: IP literal, hash or domain.
    IndicatorCheck = 1,
}

impl Category {
    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::IndicatorCheck => "indicator_check",
        }
    }

    #[must_use]
    pub const fn is_indicator(&self) -> bool {
        matches!(self, Self::IndicatorCheck)
    }
}

impl FromStr for Category {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "indicator_check" => Ok(Self::IndicatorCheck),
            _ => Err("unknown category"),
        }
    }
}

/// Where in the document a fact was discovered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FactSource {
    /// A data/content line pair or a rendered table row.
    Table,
    /// A flattened field of an embedded JSON object.
    Json,
}

/// One key/value/category triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fact {
    /// Data line of a pair, or the dotted path of a JSON field.
    pub key: String,

    /// Content line of a pair, or the stringified JSON scalar.
    pub value: String,

    /// Category assigned by the content classifier.
    pub category: Category,

    /// Which part of the document produced this fact.
    pub source: FactSource,
}

impl Fact {
    /// Create an uncategorised fact.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>, source: FactSource) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            category: Category::None,
            source,
        }
    }

    /// Set the category for this fact.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Case-insensitive substring match against the key.
    ///
    /// `term` must already be lowercased.
    #[must_use]
    pub fn key_contains(&self, term: &str) -> bool {
        self.key.to_lowercase().contains(term)
    }
}

/// The searchable set of facts for one session.
///
/// Table facts always precede JSON facts; each half keeps discovery order.
/// Each half is only ever replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactCorpus {
    table: Vec<Fact>,
    json: Vec<Fact>,
}

impl FactCorpus {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            table: Vec::new(),
            json: Vec::new(),
        }
    }

    /// Replace every table-derived fact.
    pub fn replace_table(&mut self, facts: Vec<Fact>) {
        self.table = facts;
    }

    /// Replace every JSON-derived fact.
    pub fn replace_json(&mut self, facts: Vec<Fact>) {
        self.json = facts;
    }

    #[must_use]
    pub fn table_facts(&self) -> &[Fact] {
        &self.table
    }

    #[must_use]
    pub fn json_facts(&self) -> &[Fact] {
        &self.json
    }

    /// All facts in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.table.iter().chain(self.json.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len() + self.json.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty() && self.json.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.json.clear();
    }
}

/// A ranked entry of the live result list. Ranks start at 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub rank: usize,
    pub fact: Fact,
}
