//! Path grammar shared by the resolver, column model, search and SQL generation.
//!
//! String form:
//! - `key` / `.key`        object member
//! - `[N]`                 array element by position
//! - `[field="value"]`     first array element whose `field` renders as `value`
//!
//! Strings are parsed once into a [`Path`] and serialized back only at the
//! edges (labels, SQL aliases, CSV headers).

mod resolve;
mod split;

#[cfg(test)]
mod tests;

use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

// re-exports
pub use resolve::{resolve, resolve_str};
pub use split::split_path;

///
/// PathParseError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,

    #[error("unterminated bracket segment '{segment}'")]
    Unterminated { segment: String },

    #[error("bracket segment '{segment}' is neither an index nor a field filter")]
    InvalidBracket { segment: String },

    #[error("filter segment '{segment}' has an empty field name")]
    EmptyFilterField { segment: String },
}

///
/// Segment
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Segment {
    Key(String),
    Index(usize),
    Filter { field: String, value: String },
}

impl Segment {
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }

    #[must_use]
    pub fn filter(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Filter {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(self, Self::Filter { .. })
    }

    // Write this segment in string form; `leading` drops the `.` before a
    // key in first position.
    fn write(&self, f: &mut fmt::Formatter<'_>, leading: bool) -> fmt::Result {
        match self {
            Self::Key(name) if leading => write!(f, "{name}"),
            Self::Key(name) => write!(f, ".{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Filter { field, value } => {
                write!(f, "[{field}=\"{}\"]", split::escape_filter_value(value))
            }
        }
    }
}

///
/// Path
///
/// Non-empty segment sequence addressing one location inside a record.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Path(Vec<Segment>);

impl Path {
    /// Build a path from segments; `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    /// Single-key path naming a top-level member.
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self(vec![Segment::key(name)])
    }

    pub fn parse(text: &str) -> Result<Self, PathParseError> {
        split::parse_segments(text).map(Self)
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A path with a single key segment addresses a top-level member.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        matches!(self.0.as_slice(), [Segment::Key(_)])
    }

    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.0.iter().any(Segment::is_filter)
    }

    /// Leading key, when the path starts at an object member.
    #[must_use]
    pub fn root_key(&self) -> Option<&str> {
        match self.0.first() {
            Some(Segment::Key(name)) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn last(&self) -> &Segment {
        // non-empty by construction
        &self.0[self.0.len() - 1]
    }

    /// Path of the containing value; `None` for single-segment paths.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.prefix(self.0.len() - 1)
    }

    /// First `len` segments; `None` when `len` is zero or out of range.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Option<Self> {
        if len == 0 || len > self.0.len() {
            return None;
        }

        Some(Self(self.0[..len].to_vec()))
    }

    /// Every proper prefix, shortest first. Expanding each of these
    /// containers makes the full path reachable.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Self> {
        (1..self.0.len()).filter_map(|len| self.prefix(len)).collect()
    }

    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);

        Self(segments)
    }

    /// Concatenate this path with trailing segments.
    #[must_use]
    pub fn join(&self, suffix: &[Segment]) -> Self {
        let mut segments = self.0.clone();
        segments.extend_from_slice(suffix);

        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            segment.write(f, i == 0)?;
        }

        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
