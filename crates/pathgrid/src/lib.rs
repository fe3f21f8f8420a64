//! ## Crate layout
//! - `core`: value model, path grammar and resolver, ingestion, column
//!   model, search, SQL generation, export, state container, metrics.
//! - `config`: TOML configuration loading.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` module carries the vocabulary most hosts need; the
//! free functions below cover one-shot use without a [`Workbench`].

pub use pathgrid_config as config;
pub use pathgrid_core as core;

pub mod error;

use crate::core::{
    export,
    ingest::{self, Ingested},
    path::Path,
    search::{self, Match},
    sql::{self, Dialect},
    state::{Workbench, WorkbenchOptions},
    value::Value,
};

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        config::Config,
        core::prelude::*,
    };
}

/// Ingest raw JSON, CSV, TSV or pipe-delimited text.
#[must_use]
pub fn ingest(raw: &str) -> Ingested {
    ingest::ingest(raw)
}

/// Parse a path in string form.
pub fn parse_path(text: &str) -> Result<Path, Error> {
    Path::parse(text).map_err(Error::from)
}

/// Resolve a string path against a record; malformed paths are absent.
#[must_use]
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    crate::core::path::resolve_str(record, path)
}

#[must_use]
pub fn search(records: &[Value], query: &str) -> Vec<Match> {
    search::search(records, query)
}

#[must_use]
pub fn generate_sql(columns: &[Path], dialect: Dialect) -> String {
    sql::generate_sql(columns, dialect)
}

#[must_use]
pub fn to_csv(records: &[Value], columns: &[Path]) -> String {
    export::to_csv(records, columns)
}

/// Workbench configured from a TOML file.
pub fn workbench_from_config_file(path: impl AsRef<std::path::Path>) -> Result<Workbench, Error> {
    let config = config::Config::load(path)?;

    Ok(Workbench::new(WorkbenchOptions::from(&config)))
}
