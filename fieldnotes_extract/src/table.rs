//! Line-pair fact building and markdown table rendering.
//!
//! Raw input alternates data and content lines:
//!
//! ```text
//! host
//! 10.0.0.5
//! user
//! alice
//! ```
//!
//! Each pair becomes one fact. Lines that belong to a JSON object are left to
//! the JSON extractor, and rows of an already-rendered table are read back as
//! facts directly.

use std::ops::Range;

use fieldnotes_core::{
    ContentClassifier, Fact, FactSource, JSON_SENTINEL, LinkConfig, TABLE_HEADER, TABLE_SEPARATOR,
};
use tracing::debug;

use crate::json::extract_json_objects;
use crate::regions::{json_region, lines_with_offsets, table_region};

/// Outcome of building facts from raw input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBuild {
    pub facts: Vec<Fact>,

    /// Lines skipped because they belong to a JSON object or region.
    pub skipped_json_lines: usize,

    /// Trailing data line that never got a content line.
    pub dropped_line: Option<String>,
}

/// Build facts from raw line-pair input.
#[must_use]
pub fn build_facts(text: &str, classifier: &dyn ContentClassifier) -> TableBuild {
    let excluded = json_ranges(text);
    let mut build = TableBuild::default();
    let mut pending: Option<&str> = None;

    for (start, raw) in lines_with_offsets(text) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let span = start..start + raw.len();
        if line == JSON_SENTINEL
            || excluded.iter().any(|r| overlaps(r, &span))
            || !extract_json_objects(line).is_empty()
        {
            build.skipped_json_lines += 1;
            continue;
        }

        if let Some(cells) = split_row(line) {
            if is_header(&cells) || is_separator(&cells) {
                continue;
            }
            if let Some(fact) = row_fact(&cells, classifier) {
                build.facts.push(fact);
                continue;
            }
        }

        match pending.take() {
            None => pending = Some(line),
            Some(key) => build.facts.push(classified(key, line, classifier)),
        }
    }

    if let Some(line) = pending {
        debug!("Dropping unpaired trailing line: {line}");
        build.dropped_line = Some(line.to_string());
    }

    build
}

/// Read the facts back out of the table region of a document.
#[must_use]
pub fn parse_table_rows(text: &str, classifier: &dyn ContentClassifier) -> Vec<Fact> {
    let Some(range) = table_region(text) else {
        return Vec::new();
    };

    text[range]
        .lines()
        .filter_map(|line| split_row(line.trim()))
        .filter_map(|cells| row_fact(&cells, classifier))
        .collect()
}

fn json_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = extract_json_objects(text)
        .into_iter()
        .map(|span| span.start..span.end)
        .collect();
    ranges.extend(json_region(text));
    ranges
}

const fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

fn classified(key: &str, value: &str, classifier: &dyn ContentClassifier) -> Fact {
    let category = classifier.classify(value).category;
    Fact::new(key, value, FactSource::Table).with_category(category)
}

fn row_fact(cells: &[String], classifier: &dyn ContentClassifier) -> Option<Fact> {
    let [key, value, ..] = cells else {
        return None;
    };
    if is_header(cells) || is_separator(cells) {
        return None;
    }
    Some(classified(key, value, classifier))
}

fn is_header(cells: &[String]) -> bool {
    let header: Vec<String> = split_row(TABLE_HEADER).unwrap_or_default();
    cells.len() == header.len()
        && cells
            .iter()
            .zip(&header)
            .all(|(cell, name)| cell.eq_ignore_ascii_case(name))
}

fn is_separator(cells: &[String]) -> bool {
    cells
        .iter()
        .all(|cell| !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':'))
}

/// Split a `| a | b | c |` row into trimmed, unescaped cells.
fn split_row(line: &str) -> Option<Vec<String>> {
    let inner = line.strip_prefix('|')?;
    if !inner.ends_with('|') || inner.ends_with("\\|") {
        return None;
    }
    let inner = &inner[..inner.len() - 1];

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(ch),
        }
    }
    cells.push(cell.trim().to_string());
    Some(cells)
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// Renders facts as a three-column markdown table.
pub struct TableRenderer<'a> {
    classifier: &'a dyn ContentClassifier,
    links: &'a LinkConfig,
}

impl<'a> TableRenderer<'a> {
    #[must_use]
    pub const fn new(classifier: &'a dyn ContentClassifier, links: &'a LinkConfig) -> Self {
        Self { classifier, links }
    }

    /// Render `facts` under the fixed header; every line ends with `\n`.
    #[must_use]
    pub fn render(&self, facts: &[Fact]) -> String {
        let mut table = format!("{TABLE_HEADER}\n{TABLE_SEPARATOR}\n");
        for fact in facts {
            table.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(&fact.key),
                escape_cell(&fact.value),
                self.link_for(fact)
            ));
        }
        table
    }

    /// Link text for indicator facts, empty for everything else.
    #[must_use]
    pub fn link_for(&self, fact: &Fact) -> String {
        if !fact.category.is_indicator() {
            return String::new();
        }
        let classification = self.classifier.classify(&fact.value);
        let target = classification
            .target
            .unwrap_or_else(|| fact.value.trim().to_string());
        escape_cell(&self.links.render(&target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldnotes_core::{Category, IndicatorClassifier};

    fn pairs(facts: &[Fact]) -> Vec<(&str, &str)> {
        facts
            .iter()
            .map(|f| (f.key.as_str(), f.value.as_str()))
            .collect()
    }

    #[test]
    fn test_build_pairs_lines_in_order() {
        let build = build_facts("host\n10.0.0.5\n\nuser\n  alice  \n", &IndicatorClassifier);
        assert_eq!(pairs(&build.facts), vec![("host", "10.0.0.5"), ("user", "alice")]);
        assert_eq!(build.facts[0].category, Category::IndicatorCheck);
        assert_eq!(build.facts[1].category, Category::None);
        assert_eq!(build.dropped_line, None);
    }

    #[test]
    fn test_build_drops_trailing_line() {
        let build = build_facts("host\nweb01\norphan", &IndicatorClassifier);
        assert_eq!(build.facts.len(), 1);
        assert_eq!(build.dropped_line.as_deref(), Some("orphan"));
    }

    #[test]
    fn test_build_skips_json_lines() {
        let text = "host\n{\"k\": 1}\nweb01\n{\n  \"nested\": {\"a\": 2}\n}\nuser\nbob\n";
        let build = build_facts(text, &IndicatorClassifier);
        assert_eq!(pairs(&build.facts), vec![("host", "web01"), ("user", "bob")]);
        assert_eq!(build.skipped_json_lines, 4);
    }

    #[test]
    fn test_unbalanced_brace_does_not_shift_later_pairs() {
        let text = "cmd\npowershell -c { iex\nhost\n10.0.0.5\n{\"k\":1}\nuser\nbob\n";
        let build = build_facts(text, &IndicatorClassifier);
        assert_eq!(
            pairs(&build.facts),
            vec![
                ("cmd", "powershell -c { iex"),
                ("host", "10.0.0.5"),
                ("user", "bob")
            ]
        );
        assert_eq!(build.skipped_json_lines, 1);
        assert_eq!(build.dropped_line, None);
    }

    #[test]
    fn test_single_cell_row_is_paired_like_plain_text() {
        let build = build_facts("|x|\nvalue\nhost\nweb01", &IndicatorClassifier);
        assert_eq!(pairs(&build.facts), vec![("|x|", "value"), ("host", "web01")]);
        assert_eq!(build.dropped_line, None);
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let build = build_facts("ip\n1.1.1.1\nip\n2.2.2.2", &IndicatorClassifier);
        assert_eq!(pairs(&build.facts), vec![("ip", "1.1.1.1"), ("ip", "2.2.2.2")]);
    }

    #[test]
    fn test_render_links_only_indicators() {
        let build = build_facts("host\nexample.com\nnote\nnothing here", &IndicatorClassifier);
        let links = LinkConfig::default();
        let table = TableRenderer::new(&IndicatorClassifier, &links).render(&build.facts);

        assert_eq!(
            table,
            "| Data | Content | Link |\n\
             | ---- | ------- | ---- |\n\
             | host | example.com | [Reputation Check](https://www.virustotal.com/gui/search/example.com) |\n\
             | note | nothing here |  |\n"
        );
    }

    #[test]
    fn test_render_link_uses_bare_domain() {
        let links = LinkConfig::default();
        let renderer = TableRenderer::new(&IndicatorClassifier, &links);
        let fact = Fact::new("url", "https://www.evil.example/x", FactSource::Table)
            .with_category(Category::IndicatorCheck);
        assert_eq!(
            renderer.link_for(&fact),
            "[Reputation Check](https://www.virustotal.com/gui/search/evil.example)"
        );
    }

    #[test]
    fn test_rendered_rows_build_back_into_facts() {
        let build = build_facts("cmd\na | b\nhost\n8.8.8.8", &IndicatorClassifier);
        let links = LinkConfig::default();
        let table = TableRenderer::new(&IndicatorClassifier, &links).render(&build.facts);

        let rebuilt = build_facts(&table, &IndicatorClassifier);
        assert_eq!(rebuilt.facts, build.facts);
        assert_eq!(parse_table_rows(&format!("notes\n{table}more"), &IndicatorClassifier), build.facts);
    }

    #[test]
    fn test_split_row() {
        assert_eq!(
            split_row(r"| a \| b | c |  |"),
            Some(vec!["a | b".to_string(), "c".to_string(), String::new()])
        );
        assert_eq!(split_row("plain"), None);
        assert_eq!(split_row("| open"), None);
    }
}
