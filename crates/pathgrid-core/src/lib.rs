//! Core engine for PathGrid: the record value model, the path grammar and
//! resolver, ingestion, the column model, search, SQL generation and
//! export, plus the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod column;
pub mod error;
pub mod export;
pub mod ingest;
pub mod obs;
pub mod path;
pub mod search;
pub mod sort;
pub mod sql;
pub mod state;
pub mod value;

///
/// CONSTANTS
///

/// Characters of JSON kept when a container cell is summarized in CSV.
pub const DEFAULT_PREVIEW_CHARS: usize = 15;

/// Name given to a blank header cell, followed by its 1-based position.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "column_";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, metrics, or option structs are re-exported here.
///

pub mod prelude {
    pub use crate::{
        column::{Column, ColumnModel, KeyChoice, KeyChoiceRequest, KeyChooser, Positional},
        path::{Path, Segment, resolve},
        search::{Direction, Match, MatchedPart},
        sort::{SortDirection, SortState},
        sql::Dialect,
        state::{Changed, StateObserver, Workbench},
        value::Value,
    };
}
