mod compare;
mod map;
mod rank;
mod tag;
mod text;

#[cfg(test)]
mod tests;

use serde::{Serialize, Serializer, ser::SerializeMap, ser::SerializeSeq};
use serde_json::Number;

// re-exports
pub use compare::{fold_ci, sort_cmp};
pub use map::ValueMap;
pub use rank::canonical_rank;
pub use tag::ValueTag;

///
/// Value
///
/// One node of a record tree. Absent (a missing member, an out-of-range
/// index) is never a `Value`; lookups return `Option<&Value>` and `None`
/// is the absent outcome, distinct from `Value::Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Ordered sequence; element order is the index order used by paths.
    Array(Vec<Self>),
    Bool(bool),
    Null,
    /// Numbers keep their source representation (integer vs float).
    Number(Number),
    /// Object members in source order; keys are unique.
    Object(ValueMap),
    Text(String),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Parse JSON text into a value tree.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(text).map(Self::from)
    }

    /// Build an object from owned entries; later duplicate keys replace
    /// earlier ones in place.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(entries.into_iter().collect())
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn int(n: i64) -> Self {
        Self::Number(Number::from(n))
    }

    ///
    /// KIND
    ///

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    /// Scalars are the non-container kinds that carry a value: booleans,
    /// numbers, and text. `Null` is a leaf but not a scalar.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Number(_) | Self::Text(_))
    }

    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    #[must_use]
    pub const fn as_array(&self) -> Option<&Vec<Self>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Member lookup; `None` for missing keys and non-objects.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Element lookup; `None` for out-of-range indices and non-arrays.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Self> {
        self.as_array().and_then(|items| items.get(index))
    }

    ///
    /// RENDERING
    ///

    /// Text rendering used for equality filters, search and CSV cells.
    /// Matches JavaScript `String(value)` for every kind.
    #[must_use]
    pub fn display_text(&self) -> String {
        text::display_text(self)
    }

    /// Compact JSON serialization.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // string keys only; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(ValueMap::from_unique(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            )),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::Text(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::int(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}
