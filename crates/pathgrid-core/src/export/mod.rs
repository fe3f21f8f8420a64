//! Projection of records onto the visible columns for download.

mod csv;
mod json;


// re-exports
pub use csv::{to_csv, to_csv_with};
pub use json::{to_json, to_json_string};

///
/// ExportOptions
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExportOptions {
    /// Characters of JSON text kept when summarizing object/array cells.
    pub preview_chars: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            preview_chars: crate::DEFAULT_PREVIEW_CHARS,
        }
    }
}
