use crate::value::Value;
use derive_more::{Deref, IntoIterator};

///
/// ValueMap
///
/// Object members in first-seen order with unique keys.
/// Re-inserting an existing key replaces its value in place, which matches
/// how JSON parsers treat duplicate members.
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct ValueMap(Vec<(String, Value)>);

impl ValueMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace a member, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some((_, slot)) = self.0.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }

        self.0.push((key, value));

        None
    }

    /// Wrap members whose keys are already unique, such as a parsed JSON
    /// object, without re-checking them.
    pub(crate) const fn from_unique(members: Vec<(String, Value)>) -> Self {
        Self(members)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl<K> FromIterator<(K, Value)> for ValueMap
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }

        map
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
