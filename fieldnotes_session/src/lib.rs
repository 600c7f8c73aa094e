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

//! Interactive querying of a note's facts while the note is being written.

pub mod engine;
pub mod selector;
mod session;

pub use engine::{QueryEngine, QueryPhase, QueryState, derive_term, search};
pub use selector::{Selection, quote};
pub use session::{EditEvent, EditOutcome, JsonReport, NoteSession};
