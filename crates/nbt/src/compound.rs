//! Keyed compound tag.

use std::fmt;

use indexmap::IndexMap;

use crate::tag::{write_quoted, Tag};

/// A compound tag: string keys mapped to child tags.
///
/// Iteration follows insertion order, and removing an entry keeps the
/// relative order of the remaining ones. Code that looks for "the first key
/// matching X" relies on this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagCompound {
    tags: IndexMap<String, Tag>,
}

impl TagCompound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.tags.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.tags.get_mut(key)
    }

    /// Sets `key`, returning the previous value. An existing key keeps its
    /// position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.tags.insert(key.into(), value.into())
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.tags.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Tag> {
        self.tags.iter()
    }

    /// Shallow merge: copies entries of `other` whose keys are absent here.
    pub fn merge_from(&mut self, other: &TagCompound) {
        for (key, value) in other {
            if !self.tags.contains_key(key) {
                self.tags.insert(key.clone(), value.clone());
            }
        }
    }

    /// Owned, fully independent copy.
    pub fn deep_copy(&self) -> TagCompound {
        self.clone()
    }
}

impl<'a> IntoIterator for &'a TagCompound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl IntoIterator for TagCompound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<K: Into<String>, V: Into<Tag>> FromIterator<(K, V)> for TagCompound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TagCompound {
            tags: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Tag>> Extend<(K, V)> for TagCompound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+'))
}

impl fmt::Display for TagCompound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if is_bare_key(key) {
                f.write_str(key)?;
            } else {
                write_quoted(f, key)?;
            }
            write!(f, ": {value}")?;
        }
        f.write_str("}")
    }
}
