//! TOML configuration for PathGrid.
//!
//! ```toml
//! [ingest]
//! placeholder_prefix = "column_"   # blank header cells become column_<n>
//! parse_json_cells = true
//!
//! [search]
//! max_matches = 0                  # 0 = unlimited
//!
//! [sql]
//! dialect = "postgresql"           # snowflake | postgresql | sqlserver | oracle
//! table = "my_table"
//!
//! [export]
//! preview_chars = 15
//! ```
//!
//! Every section and field is optional; missing values take the engine
//! defaults.

#[cfg(test)]
mod tests;

use pathgrid_core::{
    DEFAULT_PLACEHOLDER_PREFIX, DEFAULT_PREVIEW_CHARS,
    export::ExportOptions,
    ingest::IngestOptions,
    search::SearchOptions,
    sql::{Dialect, SqlOptions},
    state::WorkbenchOptions,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub ingest: IngestSection,
    pub search: SearchSection,
    pub sql: SqlSection,
    pub export: ExportSection,
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sql.table.trim().is_empty() {
            return Err(ConfigError::Invalid("sql.table must not be empty".to_string()));
        }
        if self.export.preview_chars == 0 {
            return Err(ConfigError::Invalid(
                "export.preview_chars must be at least 1".to_string(),
            ));
        }
        if self.ingest.placeholder_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "ingest.placeholder_prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

///
/// IngestSection
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestSection {
    pub placeholder_prefix: String,
    pub parse_json_cells: bool,
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            parse_json_cells: true,
        }
    }
}

///
/// SearchSection
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
    pub max_matches: usize,
}

///
/// SqlSection
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqlSection {
    pub dialect: Dialect,
    pub table: String,
}

impl Default for SqlSection {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            table: SqlOptions::default().table,
        }
    }
}

///
/// ExportSection
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSection {
    pub preview_chars: usize,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

///
/// CONVERSIONS
///

impl From<&IngestSection> for IngestOptions {
    fn from(section: &IngestSection) -> Self {
        Self {
            placeholder_prefix: section.placeholder_prefix.clone(),
            parse_json_cells: section.parse_json_cells,
        }
    }
}

impl From<&SearchSection> for SearchOptions {
    fn from(section: &SearchSection) -> Self {
        Self {
            max_matches: section.max_matches,
        }
    }
}

impl From<&SqlSection> for SqlOptions {
    fn from(section: &SqlSection) -> Self {
        Self {
            table: section.table.clone(),
        }
    }
}

impl From<&ExportSection> for ExportOptions {
    fn from(section: &ExportSection) -> Self {
        Self {
            preview_chars: section.preview_chars,
        }
    }
}

impl From<&Config> for WorkbenchOptions {
    fn from(config: &Config) -> Self {
        Self {
            ingest: (&config.ingest).into(),
            search: (&config.search).into(),
            sql: (&config.sql).into(),
            export: (&config.export).into(),
            dialect: config.sql.dialect,
        }
    }
}
