//! Deep substring search over record trees.
//!
//! Object keys and leaves, `null` included, are matched case-insensitively.
//! Every match carries a path that resolves against its record.

mod engine;

#[cfg(test)]
mod tests;

use crate::{
    obs::sink::{self, MetricsEvent},
    path::{Path, Segment},
    value::{Value, fold_ci},
};

// re-exports
pub use engine::{Direction, SearchEngine};

///
/// SearchOptions
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchOptions {
    /// Stop after this many matches; zero means unlimited.
    pub max_matches: usize,
}

///
/// MatchedPart
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchedPart {
    Key,
    Value,
}

///
/// Match
///
/// One hit. For a key hit `path` addresses the key's value and `offsets`
/// index into the key name; for a value hit they index into the value's
/// text. Offsets are character positions.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Match {
    pub record_index: usize,
    pub path: Path,
    pub matched_part: MatchedPart,
    pub matched_key_name: Option<String>,
    pub value: Value,
    pub offsets: Vec<usize>,
}

impl Match {
    /// Containers to expand, outermost first, for the match to be reachable.
    #[must_use]
    pub fn expand_paths(&self) -> Vec<Path> {
        self.path.ancestors()
    }
}

/// Search with default options.
#[must_use]
pub fn search(records: &[Value], query: &str) -> Vec<Match> {
    search_with(records, query, &SearchOptions::default())
}

/// Depth-first search of every record, in record order then member order.
/// A blank query yields nothing.
#[must_use]
pub fn search_with(records: &[Value], query: &str, options: &SearchOptions) -> Vec<Match> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = fold_ci(query);
    let mut walker = Walker {
        needle: &needle,
        limit: options.max_matches,
        record_index: 0,
        matches: Vec::new(),
    };

    for (record_index, record) in records.iter().enumerate() {
        if walker.is_full() {
            break;
        }
        walker.record_index = record_index;
        walker.visit_children(record, &[]);
    }

    tracing::debug!(
        records = records.len(),
        matches = walker.matches.len(),
        "search: complete"
    );
    sink::record(MetricsEvent::Search {
        records: records.len() as u64,
        matches: walker.matches.len() as u64,
    });

    walker.matches
}

/// Non-overlapping character offsets of `needle` in `text`, both already
/// case folded.
fn offsets(text: &str, needle: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut chars_seen = 0;
    let mut bytes_seen = 0;

    for (byte, _) in text.match_indices(needle) {
        chars_seen += text[bytes_seen..byte].chars().count();
        bytes_seen = byte;
        offsets.push(chars_seen);
    }

    offsets
}

///
/// Walker
///

struct Walker<'a> {
    needle: &'a str,
    limit: usize,
    record_index: usize,
    matches: Vec<Match>,
}

impl Walker<'_> {
    const fn is_full(&self) -> bool {
        self.limit != 0 && self.matches.len() >= self.limit
    }

    // Scalar roots have no path and are not searched.
    fn visit_children(&mut self, value: &Value, prefix: &[Segment]) {
        match value {
            Value::Object(members) => {
                for (key, member) in members {
                    if self.is_full() {
                        return;
                    }
                    let segments = extend(prefix, Segment::key(key));
                    self.visit_key(key, member, &segments);
                    self.visit(member, segments);
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if self.is_full() {
                        return;
                    }
                    self.visit(item, extend(prefix, Segment::Index(index)));
                }
            }
            _ => {}
        }
    }

    fn visit(&mut self, value: &Value, segments: Vec<Segment>) {
        if value.is_container() {
            self.visit_children(value, &segments);
        } else {
            self.visit_leaf(value, segments);
        }
    }

    fn visit_key(&mut self, key: &str, member: &Value, segments: &[Segment]) {
        let offsets = offsets(&fold_ci(key), self.needle);
        if offsets.is_empty() || self.is_full() {
            return;
        }
        let Some(path) = Path::from_segments(segments.to_vec()) else {
            return;
        };

        self.matches.push(Match {
            record_index: self.record_index,
            path,
            matched_part: MatchedPart::Key,
            matched_key_name: Some(key.to_string()),
            value: member.clone(),
            offsets,
        });
    }

    fn visit_leaf(&mut self, value: &Value, segments: Vec<Segment>) {
        let offsets = offsets(&fold_ci(&value.display_text()), self.needle);
        if offsets.is_empty() || self.is_full() {
            return;
        }
        let Some(path) = Path::from_segments(segments) else {
            return;
        };

        // a key hit is pushed right before its value is visited
        if self.matches.last().is_some_and(|last| {
            last.record_index == self.record_index
                && last.matched_part == MatchedPart::Key
                && last.path == path
        }) {
            return;
        }

        self.matches.push(Match {
            record_index: self.record_index,
            path,
            matched_part: MatchedPart::Value,
            matched_key_name: None,
            value: value.clone(),
            offsets,
        });
    }
}

fn extend(prefix: &[Segment], segment: Segment) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(prefix.len() + 1);
    segments.extend_from_slice(prefix);
    segments.push(segment);

    segments
}
