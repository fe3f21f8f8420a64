use derive_more::Deref;

///
/// UniqueList
///
/// Ordered list that enforces uniqueness on insertion.
/// Order is first-seen insertion order unless explicitly moved.
///

#[repr(transparent)]
#[derive(Clone, Debug, Deref, Eq, PartialEq)]
pub struct UniqueList<T>(Vec<T>);

impl<T> UniqueList<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: Eq> UniqueList<T> {
    /// Build a unique list, discarding later duplicates.
    #[must_use]
    pub fn from_vec(values: Vec<T>) -> Self {
        let mut list = Self::new();
        for value in values {
            list.insert(value);
        }

        list
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.position(value).is_some()
    }

    #[must_use]
    pub fn position(&self, value: &T) -> Option<usize> {
        self.0.iter().position(|existing| existing == value)
    }

    /// Append a value, returning `true` if it was newly inserted.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }

        self.0.push(value);

        true
    }

    /// Remove a value, returning `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        if let Some(index) = self.position(value) {
            self.0.remove(index);
            return true;
        }

        false
    }

    /// Move `source` to sit immediately before `target`.
    /// Returns `false` (and leaves the list untouched) when either value is
    /// missing or both are the same value.
    pub fn move_before(&mut self, source: &T, target: &T) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(_)) = (self.position(source), self.position(target)) else {
            return false;
        };

        let moved = self.0.remove(from);
        // target index shifts once `source` is out of the list
        let to = self.position(target).unwrap_or(self.0.len());
        self.0.insert(to, moved);

        true
    }
}

// manual impl: a derive would require `T: Default`
impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for UniqueList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
