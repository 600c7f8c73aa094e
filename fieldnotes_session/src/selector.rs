//! Rank selection and splice-style insertion of the chosen value.

use std::ops::Range;

use fieldnotes_core::Document;
use tracing::{debug, info, warn};

use crate::engine::{QueryEngine, QueryPhase};

/// Outcome of [`select_by_rank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The value at `rank` replaced the in-progress trigger token.
    Inserted { rank: usize, value: String },

    /// Nothing happened; an open query stays open.
    Ignored,

    /// The query was closed without inserting anything.
    Abandoned,
}

/// Quote a value for insertion into the note.
#[must_use]
pub fn quote(value: &str) -> String {
    format!("\"{value}\"")
}

/// Span replaced by an insertion: from the trigger (or just past it when
/// `retain_trigger` is set) up to the cursor.
fn insertion_range(
    text: &str,
    trigger: char,
    trigger_offset: usize,
    cursor: usize,
    retain_trigger: bool,
) -> Option<Range<usize>> {
    if !text.get(trigger_offset..)?.starts_with(trigger) {
        return None;
    }
    let start = if retain_trigger {
        trigger_offset + trigger.len_utf8()
    } else {
        trigger_offset
    };
    (start <= cursor).then_some(start..cursor)
}

/// Insert the value at `rank` of the live result list into `document`.
///
/// Out-of-range ranks and calls outside `ResultsReady` are ignored so a stray
/// digit is harmless; with `ignore_out_of_range` off an out-of-range rank
/// abandons the query instead. Every other outcome leaves the engine idle.
pub fn select_by_rank(engine: &mut QueryEngine, document: &mut Document, rank: usize) -> Selection {
    if engine.phase() != QueryPhase::ResultsReady || !engine.state().trigger_active {
        return Selection::Ignored;
    }

    let Some(value) = engine.result(rank).map(|r| r.fact.value.clone()) else {
        if engine.config().ignore_out_of_range {
            debug!("Rank {rank} out of range, ignoring");
            return Selection::Ignored;
        }
        engine.reset();
        return Selection::Abandoned;
    };

    let range = engine.state().trigger_offset.and_then(|offset| {
        insertion_range(
            document.text(),
            engine.config().trigger,
            offset,
            document.cursor(),
            engine.config().retain_trigger,
        )
    });
    engine.reset();

    let Some(range) = range else {
        warn!("Trigger no longer precedes the cursor, dropping selection");
        return Selection::Abandoned;
    };

    match document.splice(range, &format!(" {}", quote(&value))) {
        Ok(()) => {
            info!("Inserted result {rank}: {value}");
            Selection::Inserted { rank, value }
        }
        Err(e) => {
            warn!("Failed to insert result {rank}: {e}");
            Selection::Abandoned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldnotes_core::{Fact, FactCorpus, FactSource, QueryConfig};

    fn ready(text: &str, config: QueryConfig) -> (QueryEngine, Document) {
        let mut corpus = FactCorpus::new();
        corpus.replace_table(vec![
            Fact::new("host", "10.0.0.5", FactSource::Table),
            Fact::new("hostname", "web01", FactSource::Table),
        ]);
        #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
        let mut engine = QueryEngine::new(config).expect("config should be valid");
        let document = Document::from_text(text);
        let trigger = text.rfind(':').unwrap_or_default();
        engine.on_trigger(document.text(), trigger, &corpus);
        (engine, document)
    }

    #[test]
    fn test_select_replaces_trigger_token() {
        let (mut engine, mut document) = ready("ip host:", QueryConfig::default());

        let selection = select_by_rank(&mut engine, &mut document, 1);

        assert_eq!(
            selection,
            Selection::Inserted {
                rank: 1,
                value: "10.0.0.5".to_string()
            }
        );
        assert_eq!(document.text(), "ip host \"10.0.0.5\"");
        assert_eq!(document.cursor(), document.len());
        assert_eq!(engine.phase(), QueryPhase::Idle);
        assert!(engine.results().is_empty());
    }

    #[test]
    fn test_select_retaining_trigger() {
        let config = QueryConfig {
            retain_trigger: true,
            ..QueryConfig::default()
        };
        let (mut engine, mut document) = ready("host:2", config);

        select_by_rank(&mut engine, &mut document, 2);
        assert_eq!(document.text(), "host: \"web01\"");
    }

    #[test]
    fn test_out_of_range_is_ignored_and_query_stays_open() {
        let (mut engine, mut document) = ready("host:", QueryConfig::default());

        assert_eq!(select_by_rank(&mut engine, &mut document, 5), Selection::Ignored);
        assert_eq!(select_by_rank(&mut engine, &mut document, 0), Selection::Ignored);
        assert_eq!(document.text(), "host:");
        assert_eq!(engine.phase(), QueryPhase::ResultsReady);

        assert!(matches!(
            select_by_rank(&mut engine, &mut document, 2),
            Selection::Inserted { rank: 2, .. }
        ));
    }

    #[test]
    fn test_out_of_range_abandons_when_configured() {
        let config = QueryConfig {
            ignore_out_of_range: false,
            ..QueryConfig::default()
        };
        let (mut engine, mut document) = ready("host:", config);

        assert_eq!(select_by_rank(&mut engine, &mut document, 7), Selection::Abandoned);
        assert_eq!(document.text(), "host:");
        assert_eq!(engine.phase(), QueryPhase::Idle);
    }

    #[test]
    fn test_select_when_idle_is_ignored() {
        let (mut engine, mut document) = ready("nothing:", QueryConfig::default());
        assert_eq!(engine.phase(), QueryPhase::Idle);
        assert_eq!(select_by_rank(&mut engine, &mut document, 1), Selection::Ignored);
        assert_eq!(document.text(), "nothing:");
    }

    #[test]
    fn test_moved_trigger_abandons() {
        let (mut engine, mut document) = ready("host:", QueryConfig::default());
        document.set_cursor(0);
        document.insert_char('x');
        document.set_cursor(document.len());

        assert_eq!(select_by_rank(&mut engine, &mut document, 1), Selection::Abandoned);
        assert_eq!(document.text(), "xhost:");
        assert_eq!(engine.phase(), QueryPhase::Idle);
    }
}
