//! An editing session: one document, its fact corpus and the query state.
//!
//! Every operation runs to completion before the next one starts. Table and
//! JSON rebuilds compute the new document text in full before swapping it in,
//! so a caller never observes a half-written buffer.

use std::path::PathBuf;

use fieldnotes_core::{
    CaseLabels, ConfigError, ContentClassifier, Document, DocumentSink, FactCorpus, FactError,
    IndicatorClassifier, LinkConfig, QueryConfig, SearchResult, SinkError,
};
use fieldnotes_extract::{
    TableBuild, TableRenderer, build_facts, extract_facts, json_region_body, parse_table_rows,
    pretty_print, render_json_region, replace_json_region, replace_table,
};
use tracing::{info, warn};

use crate::engine::{QueryEngine, QueryPhase, QueryState, derive_term, search};
use crate::selector::{Selection, select_by_rank};

/// A single editing event from the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent {
    /// A typed character, inserted at the cursor.
    Insert(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Move the cursor to a byte offset.
    MoveCursor(usize),
}

/// What an [`EditEvent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Plain edit; any open query was abandoned.
    Edited,
    /// A trigger opened a query. `matches == 0` means the engine is idle again.
    Searched { term: String, matches: usize },
    /// A digit was applied as a rank to the live results.
    Selected(Selection),
}

/// Summary of a JSON parse action.
#[derive(Debug, Default)]
pub struct JsonReport {
    pub objects: usize,
    pub facts: usize,
    pub errors: Vec<FactError>,
}

pub struct NoteSession {
    document: Document,
    corpus: FactCorpus,
    engine: QueryEngine,
    classifier: Box<dyn ContentClassifier>,
    links: LinkConfig,
}

impl NoteSession {
    pub fn new(query: QueryConfig, links: LinkConfig) -> Result<Self, ConfigError> {
        links.validate()?;
        Ok(Self {
            document: Document::new(),
            corpus: FactCorpus::new(),
            engine: QueryEngine::new(query)?,
            classifier: Box::new(IndicatorClassifier::new()),
            links,
        })
    }

    /// Session with default query and link settings.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(QueryConfig::default(), LinkConfig::default())
    }

    /// Replace the content classifier.
    #[must_use]
    pub fn with_classifier<C>(mut self, classifier: C) -> Self
    where
        C: ContentClassifier + 'static,
    {
        self.classifier = Box::new(classifier);
        self
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub const fn corpus(&self) -> &FactCorpus {
        &self.corpus
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        self.engine.results()
    }

    #[must_use]
    pub const fn phase(&self) -> QueryPhase {
        self.engine.phase()
    }

    #[must_use]
    pub const fn query_state(&self) -> &QueryState {
        self.engine.state()
    }

    /// Build facts from raw line-pair input and render them as the
    /// document's table, replacing any existing table.
    pub fn build_table(&mut self, input: &str) -> TableBuild {
        let build = build_facts(input, self.classifier.as_ref());
        let table = TableRenderer::new(self.classifier.as_ref(), &self.links).render(&build.facts);

        let (text, cursor) = replace_table(self.document.text(), self.document.cursor(), &table);
        self.document.replace_text(text, cursor);
        self.corpus.replace_table(build.facts.clone());
        self.engine.reset();

        info!(
            "Built table: {} facts, {} JSON lines skipped, trailing line dropped: {}",
            build.facts.len(),
            build.skipped_json_lines,
            build.dropped_line.is_some()
        );
        build
    }

    /// Extract every JSON object from `input`, replace the JSON facts and
    /// embed the objects in the document's JSON region.
    pub fn parse_json(&mut self, input: &str) -> JsonReport {
        let extraction = extract_facts(input, self.classifier.as_ref());

        let pretty: Vec<String> = extraction
            .objects
            .iter()
            .filter_map(|value| {
                pretty_print(value)
                    .map_err(|e| warn!("Failed to pretty-print object: {e}"))
                    .ok()
            })
            .collect();
        let region = (!pretty.is_empty()).then(|| render_json_region(&pretty));

        let (text, cursor) = replace_json_region(
            self.document.text(),
            self.document.cursor(),
            region.as_deref(),
        );
        self.document.replace_text(text, cursor);

        let report = JsonReport {
            objects: extraction.objects.len(),
            facts: extraction.facts.len(),
            errors: extraction.errors,
        };
        self.corpus.replace_json(extraction.facts);
        self.engine.reset();

        info!(
            "Parsed JSON: {} objects, {} facts, {} invalid spans",
            report.objects,
            report.facts,
            report.errors.len()
        );
        report
    }

    /// Rebuild the corpus from the document text alone.
    pub fn reindex(&mut self) -> usize {
        let text = self.document.text();
        let table = parse_table_rows(text, self.classifier.as_ref());
        let json = json_region_body(text)
            .map(|body| extract_facts(body, self.classifier.as_ref()).facts)
            .unwrap_or_default();

        self.corpus.replace_table(table);
        self.corpus.replace_json(json);
        self.engine.reset();
        self.corpus.len()
    }

    /// Replace the document text, put the cursor at the end and reindex.
    pub fn load_text(&mut self, text: impl Into<String>) -> usize {
        self.document = Document::from_text(text);
        self.reindex()
    }

    /// Apply one editing event and advance the query state machine.
    pub fn apply(&mut self, event: EditEvent) -> EditOutcome {
        match event {
            EditEvent::Insert(ch) => self.insert(ch),
            EditEvent::Backspace => {
                self.document.delete_backward();
                self.engine.abandon();
                EditOutcome::Edited
            }
            EditEvent::MoveCursor(offset) => {
                self.document.set_cursor(offset);
                self.engine.abandon();
                EditOutcome::Edited
            }
        }
    }

    fn insert(&mut self, ch: char) -> EditOutcome {
        self.document.insert_char(ch);

        if self.engine.phase() == QueryPhase::ResultsReady {
            if let Some(rank) = ch.to_digit(10).and_then(|d| usize::try_from(d).ok()) {
                return EditOutcome::Selected(self.select_by_rank(rank));
            }
        }

        if self.engine.is_trigger(ch) {
            let trigger_offset = self.document.cursor() - ch.len_utf8();
            let term = derive_term(self.document.text(), trigger_offset);
            let matches = self
                .engine
                .on_trigger(self.document.text(), trigger_offset, &self.corpus)
                .len();
            return EditOutcome::Searched { term, matches };
        }

        self.engine.abandon();
        EditOutcome::Edited
    }

    /// Type `text` one character at a time; returns the last outcome.
    pub fn type_text(&mut self, text: &str) -> EditOutcome {
        text.chars()
            .map(|ch| self.apply(EditEvent::Insert(ch)))
            .last()
            .unwrap_or(EditOutcome::Edited)
    }

    /// Insert the live result at `rank` in place of the trigger token.
    pub fn select_by_rank(&mut self, rank: usize) -> Selection {
        select_by_rank(&mut self.engine, &mut self.document, rank)
    }

    /// Search the corpus without touching the query state.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<SearchResult> {
        search(&self.corpus, term, self.engine.config().max_results)
    }

    /// Empty the document, the corpus and the live results.
    pub fn clear(&mut self) {
        self.document.clear();
        self.corpus.clear();
        self.engine.reset();
    }

    /// Hand the document to a persistence sink.
    pub fn save(&self, sink: &dyn DocumentSink, labels: &CaseLabels) -> Result<PathBuf, SinkError> {
        labels.validate()?;
        sink.write(self.document.text(), labels)
    }
}
