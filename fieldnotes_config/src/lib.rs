mod schema;

pub use schema::{CaseFilesConfig, Config};
