//! Ordered, named groups of entries with a name → position index.

use hashbrown::HashMap;

/// Named sets of one entity kind, in insertion order.
///
/// If two sets share a name, lookup by name finds the later one; both stay
/// addressable by position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NamedSets<T> {
    sets: Vec<Vec<T>>,
    names: Vec<String>,
    index_by_name: HashMap<String, usize>,
}

impl<T> Default for NamedSets<T> {
    fn default() -> Self {
        Self {
            sets: Vec::new(),
            names: Vec::new(),
            index_by_name: HashMap::new(),
        }
    }
}

impl<T> NamedSets<T> {
    pub(crate) fn len(&self) -> usize {
        self.sets.len()
    }

    pub(crate) fn clear(&mut self) {
        self.sets.clear();
        self.names.clear();
        self.index_by_name.clear();
    }

    /// Append a set; returns its position.
    pub(crate) fn push(&mut self, name: impl Into<String>, members: Vec<T>) -> usize {
        let name = name.into();
        let s = self.sets.len();
        self.index_by_name.insert(name.clone(), s);
        self.names.push(name);
        self.sets.push(members);
        s
    }

    pub(crate) fn name(&self, s: usize) -> &str {
        &self.names[s]
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    pub(crate) fn members(&self, s: usize) -> &[T] {
        &self.sets[s]
    }

    pub(crate) fn members_mut(&mut self, s: usize) -> &mut Vec<T> {
        &mut self.sets[s]
    }

    pub(crate) fn sets_mut(&mut self) -> impl Iterator<Item = &mut Vec<T>> + '_ {
        self.sets.iter_mut()
    }

    /// `(name, members)` in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[T])> + '_ {
        self.names
            .iter()
            .zip(&self.sets)
            .map(|(n, s)| (n.as_str(), s.as_slice()))
    }
}
