use std::io::Write;
use std::path::{Path, PathBuf};

use fieldnotes_core::CaseLabels;
use fieldnotes_session::{EditOutcome, NoteSession, QueryPhase, Selection};
use tracing::{debug, warn};

use crate::sink::CaseFileSink;

/// Input parameters for the Notes command strategy.
#[derive(Debug, Clone)]
pub struct NotesInput {
    /// Raw input to pre-build the table and JSON region from
    pub input: Option<PathBuf>,
}

/// Strategy for an interactive note-taking session on stdin.
#[derive(Debug, Clone, Copy)]
pub struct NotesStrategy;

impl super::CommandStrategy for NotesStrategy {
    type Input = NotesInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let (config, mut session) = super::open_session()?;
        let sink = CaseFileSink::new(config.case_files.resolve_root()?);

        if let Some(path) = &input.input {
            let raw = super::read_input(path)?;
            load_raw(&mut session, &raw);
        }

        println!("=== fieldnotes ===");
        println!(
            "Type notes; end a word with {:?} to look it up, then enter a rank.",
            config.query.trigger
        );
        println!("Commands: /table FILE, /json FILE, /show, /results, /save SUBJECT ALERT LINK, /clear, /quit\n");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);

            if let Some(command) = line.strip_prefix('/') {
                match run_command(&mut session, &sink, command) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => eprintln!("Error: {e}"),
                }
                continue;
            }

            type_line(&mut session, line);
        }

        println!("\nSession ended. Document length: {} bytes", session.document().len());
        Ok(())
    }
}

enum Flow {
    Continue,
    Quit,
}

fn run_command(
    session: &mut NoteSession,
    sink: &CaseFileSink,
    command: &str,
) -> anyhow::Result<Flow> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("quit" | "exit" | "q", _) => return Ok(Flow::Quit),
        ("table", [path]) => {
            let raw = super::read_input(Path::new(path))?;
            let build = session.build_table(&raw);
            if let Some(line) = &build.dropped_line {
                warn!("Ignoring unpaired trailing line: {line}");
            }
            println!("Table rebuilt with {} facts", build.facts.len());
        }
        ("json", [path]) => {
            let raw = super::read_input(Path::new(path))?;
            let report = session.parse_json(&raw);
            for error in &report.errors {
                warn!("{error}");
            }
            println!(
                "Parsed {} objects into {} facts",
                report.objects, report.facts
            );
        }
        ("show", []) => print!("{}", session.document().text()),
        ("results", []) => {
            if session.results().is_empty() {
                println!("No live results");
            } else {
                super::print_results(session.results());
            }
        }
        ("save", [subject, alert, link]) => {
            let labels = CaseLabels::new(*subject, *alert, *link);
            let path = session.save(sink, &labels)?;
            println!("Saved to {}", path.display());
        }
        ("clear", []) => {
            session.clear();
            println!("Document cleared");
        }
        _ => anyhow::bail!("Unknown command or wrong arguments: /{command}"),
    }
    Ok(Flow::Continue)
}

fn load_raw(session: &mut NoteSession, raw: &str) {
    let build = session.build_table(raw);
    let report = session.parse_json(raw);
    for error in &report.errors {
        warn!("{error}");
    }
    println!(
        "Loaded {} table facts and {} JSON facts",
        build.facts.len(),
        report.facts
    );
}

fn type_line(session: &mut NoteSession, line: &str) {
    match session.type_text(line) {
        EditOutcome::Searched { term, matches } => {
            debug!("Lookup {term:?} matched {matches}");
            if matches == 0 {
                println!("No facts match {term:?}");
            } else {
                super::print_results(session.results());
            }
        }
        EditOutcome::Selected(Selection::Inserted { rank, value }) => {
            println!("Inserted #{rank}: {value}");
        }
        EditOutcome::Selected(Selection::Abandoned) => println!("Lookup abandoned"),
        EditOutcome::Selected(Selection::Ignored) | EditOutcome::Edited => {}
    }

    if session.phase() != QueryPhase::ResultsReady {
        session.type_text("\n");
    }
}
