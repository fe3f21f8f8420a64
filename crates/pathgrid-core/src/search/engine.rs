use crate::{
    search::{Match, SearchOptions, search_with},
    value::Value,
};

///
/// Direction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Next,
    Prev,
}

///
/// SearchEngine
///
/// The last result set and a cursor over it. Each run replaces both; the
/// cursor starts on the first match, or on nothing when there are none.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchEngine {
    query: String,
    matches: Vec<Match>,
    cursor: Option<usize>,
    options: SearchOptions,
}

impl SearchEngine {
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Run a new search, replacing the previous results.
    pub fn run(&mut self, records: &[Value], query: &str) -> &[Match] {
        let matches = search_with(records, query, &self.options);

        self.cursor = if matches.is_empty() { None } else { Some(0) };
        self.matches = matches;
        self.query = query.to_string();

        &self.matches
    }

    /// Move the cursor with wrap-around in both directions. No-op when
    /// there are no matches.
    pub fn advance(&mut self, direction: Direction) -> Option<&Match> {
        let total = self.matches.len();
        let cursor = self.cursor?;

        self.cursor = Some(match direction {
            Direction::Next => (cursor + 1) % total,
            Direction::Prev => (cursor + total - 1) % total,
        });

        self.current()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.cursor = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&Match> {
        self.cursor.and_then(|i| self.matches.get(i))
    }

    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
