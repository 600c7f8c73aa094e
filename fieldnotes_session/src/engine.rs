//! Trigger-driven query engine.
//!
//! ```text
//!   Idle --trigger--> Collecting --term + matches--> ResultsReady
//!    ^                    |                               |
//!    +---- empty term ----+                               |
//!    +---------- digit (selection) / any other edit ------+
//! ```
//!
//! The search term is the token between the trigger and the nearest
//! whitespace or line start before it.

use fieldnotes_core::{ConfigError, FactCorpus, QueryConfig, SearchResult};
use tracing::debug;

/// Phase of the query state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryPhase {
    #[default]
    Idle,
    Collecting,
    ResultsReady,
}

/// Transient query state, reset after every selection or abandoned query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub trigger_active: bool,
    pub pending_term: String,

    /// Byte offset of the trigger character that opened the query.
    pub trigger_offset: Option<usize>,
}

pub struct QueryEngine {
    config: QueryConfig,
    phase: QueryPhase,
    state: QueryState,
    results: Vec<SearchResult>,
}

impl QueryEngine {
    pub fn new(config: QueryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            phase: QueryPhase::Idle,
            state: QueryState::default(),
            results: Vec::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    #[must_use]
    pub const fn phase(&self) -> QueryPhase {
        self.phase
    }

    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// The live result list.
    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Result at a 1-based rank.
    #[must_use]
    pub fn result(&self, rank: usize) -> Option<&SearchResult> {
        rank.checked_sub(1).and_then(|index| self.results.get(index))
    }

    #[must_use]
    pub fn is_trigger(&self, ch: char) -> bool {
        ch == self.config.trigger
    }

    /// Open a query for the trigger at `trigger_offset` in `text`.
    ///
    /// Any previous query is discarded first. Ends in `ResultsReady` when the
    /// derived term has matches, otherwise back in `Idle`.
    pub fn on_trigger(
        &mut self,
        text: &str,
        trigger_offset: usize,
        corpus: &FactCorpus,
    ) -> &[SearchResult] {
        self.reset();
        self.phase = QueryPhase::Collecting;
        self.state = QueryState {
            trigger_active: true,
            pending_term: derive_term(text, trigger_offset),
            trigger_offset: Some(trigger_offset),
        };
        debug!("Query term derived: {:?}", self.state.pending_term);

        let results = search(corpus, &self.state.pending_term, self.config.max_results);
        if results.is_empty() {
            self.reset();
        } else {
            self.results = results;
            self.phase = QueryPhase::ResultsReady;
        }
        &self.results
    }

    /// Drop any open query because of an unrelated edit.
    pub fn abandon(&mut self) {
        if self.phase != QueryPhase::Idle {
            debug!("Query {:?} abandoned", self.state.pending_term);
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.phase = QueryPhase::Idle;
        self.state = QueryState::default();
        self.results.clear();
    }
}

/// Token between the last whitespace before `trigger_offset` and the trigger,
/// trimmed and lowercased.
#[must_use]
pub fn derive_term(text: &str, trigger_offset: usize) -> String {
    let Some(before) = text.get(..trigger_offset) else {
        return String::new();
    };
    let start = before
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(offset, ch)| offset + ch.len_utf8());
    before[start..].trim().to_lowercase()
}

/// Case-insensitive substring-in-key search, ranked in corpus order.
///
/// The full match list is built before being cut to `cap`; ranks are
/// positions in the cut list.
#[must_use]
pub fn search(corpus: &FactCorpus, term: &str, cap: usize) -> Vec<SearchResult> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let matches: Vec<_> = corpus.iter().filter(|fact| fact.key_contains(&term)).collect();
    let total = matches.len();

    let results: Vec<SearchResult> = matches
        .into_iter()
        .take(cap)
        .enumerate()
        .map(|(index, fact)| SearchResult {
            rank: index + 1,
            fact: fact.clone(),
        })
        .collect();

    debug!("Search {term:?}: {total} matches, {} shown", results.len());
    results
}
