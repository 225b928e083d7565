//! Ordered series of named values.
//!
//! Used for cookies and any other multi-valued parameter list where several
//! entries may share a name and insertion order matters.

use std::slice;

/// A value that can be looked up by name inside a [`Series`].
pub trait Named {
    /// The name entries are looked up by.
    fn name(&self) -> &str;

    /// The entry's value, if it carries one.
    fn value(&self) -> Option<&str>;
}

/// An ordered list of named entries, duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series<T> {
    entries: Vec<T>,
}

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: Named> Series<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, keeping any existing entry with the same name.
    pub fn add(&mut self, entry: T) -> &mut Self {
        self.entries.push(entry);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Returns the first entry with the given name, compared case-sensitively.
    pub fn first(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Returns the first entry with the given name, ignoring ASCII case.
    pub fn first_ignore_case(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|entry| entry.name().eq_ignore_ascii_case(name))
    }

    /// Returns the value of the first entry with the given name.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.first(name).and_then(Named::value)
    }

    /// Returns the values of every entry with the given name, in order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter(move |entry| entry.name() == name).filter_map(Named::value)
    }

    /// Removes every entry with the given name, returning true if any was removed.
    pub fn remove_all(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name() != name);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Named> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<T> IntoIterator for Series<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
