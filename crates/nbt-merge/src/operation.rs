//! Edit operations and keyed diffs.
//!
//! A diff maps locations to [`Operation`]s. Compound entries are keyed by
//! name, identity-matched list elements by [`IdentityKey`], and positional
//! list elements by index. `Replace` payloads borrow from the tree the diff
//! was computed against and are only cloned when applied.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use nbt::Tag;

use crate::identity::IdentityKey;

/// One edit at one location.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<'a> {
    /// Delete the entry.
    Remove,
    /// Overwrite the entry wholesale.
    Replace(&'a Tag),
    /// Apply a nested diff to the compound at this location.
    RecurseCompound(CompoundDiff<'a>),
    /// Apply a nested identity-keyed diff to the list at this location.
    RecurseListById(IdListDiff<'a>),
    /// Apply a nested index-keyed diff to the list at this location.
    RecurseListByPosition(ListDiff<'a>),
}

/// Discriminant of an [`Operation`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Remove,
    Replace,
    RecurseCompound,
    RecurseListById,
    RecurseListByPosition,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Remove => "remove",
            OperationKind::Replace => "replace",
            OperationKind::RecurseCompound => "compound edit",
            OperationKind::RecurseListById => "list edit by identity",
            OperationKind::RecurseListByPosition => "list edit by position",
        })
    }
}

impl<'a> Operation<'a> {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Remove => OperationKind::Remove,
            Operation::Replace(_) => OperationKind::Replace,
            Operation::RecurseCompound(_) => OperationKind::RecurseCompound,
            Operation::RecurseListById(_) => OperationKind::RecurseListById,
            Operation::RecurseListByPosition(_) => OperationKind::RecurseListByPosition,
        }
    }

    /// Renders this operation at `path`, one line per leaf change.
    pub fn write(&self, out: &mut String, path: &str) {
        match self {
            Operation::Remove => {
                out.push_str(path);
                out.push_str(" = null\n");
            }
            Operation::Replace(value) => {
                out.push_str(path);
                out.push_str(" = ");
                out.push_str(&value.to_string());
                out.push('\n');
            }
            Operation::RecurseCompound(sub) => sub.write_to(out, path),
            Operation::RecurseListById(sub) => sub.write_to(out, path),
            Operation::RecurseListByPosition(sub) => sub.write_to(out, path),
        }
    }
}

// ── Keys ──────────────────────────────────────────────────────────────────

/// A location inside a container.
pub trait DiffKey: Clone + Eq + Hash + fmt::Debug {
    /// Path of this key below `context`.
    fn path(&self, context: &str) -> String;
}

fn dotted(context: &str, key: &dyn fmt::Display) -> String {
    if context.is_empty() {
        key.to_string()
    } else {
        format!("{context}.{key}")
    }
}

impl DiffKey for String {
    fn path(&self, context: &str) -> String {
        dotted(context, self)
    }
}

impl DiffKey for IdentityKey {
    fn path(&self, context: &str) -> String {
        dotted(context, self)
    }
}

impl DiffKey for usize {
    fn path(&self, context: &str) -> String {
        format!("{context}[{self}]")
    }
}

// ── Keyed diffs ───────────────────────────────────────────────────────────

/// Ordered mapping from location to operation.
///
/// Iteration follows insertion order, which the differ fills in source
/// order, so rendering and application are deterministic.
#[derive(Debug, Clone)]
pub struct KeyedDiff<'a, K> {
    pub(crate) ops: IndexMap<K, Operation<'a>>,
}

/// Diff of a compound, keyed by entry name.
pub type CompoundDiff<'a> = KeyedDiff<'a, String>;

/// Diff of a list whose elements are matched by identity.
pub type IdListDiff<'a> = KeyedDiff<'a, IdentityKey>;

/// Diff of a list whose elements are matched by index.
pub type ListDiff<'a> = KeyedDiff<'a, usize>;

impl<'a, K: DiffKey> KeyedDiff<'a, K> {
    pub fn new() -> Self {
        Self {
            ops: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&Operation<'a>> {
        self.ops.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.ops.contains_key(key)
    }

    /// Records `op` at `key`, replacing any earlier operation there.
    pub fn insert(&mut self, key: K, op: Operation<'a>) -> Option<Operation<'a>> {
        self.ops.insert(key, op)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, Operation<'a>> {
        self.ops.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.ops.keys()
    }

    /// Renders every change as `path = value` lines below `context`.
    pub fn write(&self, context: &str) -> String {
        let mut out = String::new();
        self.write_to(&mut out, context);
        out
    }

    pub fn write_to(&self, out: &mut String, context: &str) {
        for (key, op) in &self.ops {
            op.write(out, &key.path(context));
        }
    }
}

impl<'a, K: DiffKey> Default for KeyedDiff<'a, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: DiffKey> PartialEq for KeyedDiff<'a, K> {
    fn eq(&self, other: &Self) -> bool {
        self.ops == other.ops
    }
}

impl<'a, K: DiffKey> FromIterator<(K, Operation<'a>)> for KeyedDiff<'a, K> {
    fn from_iter<I: IntoIterator<Item = (K, Operation<'a>)>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl<'a, 'd, K: DiffKey> IntoIterator for &'d KeyedDiff<'a, K> {
    type Item = (&'d K, &'d Operation<'a>);
    type IntoIter = indexmap::map::Iter<'d, K, Operation<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl<'a, K: DiffKey> fmt::Display for KeyedDiff<'a, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.write(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbt::TagCompound;

    #[test]
    fn write_renders_dotted_paths_and_indices() {
        let five = Tag::Int(5);
        let name = Tag::from("Steve");

        let mut positions = ListDiff::new();
        positions.insert(2, Operation::Remove);
        positions.insert(3, Operation::Replace(&five));

        let mut by_id = IdListDiff::new();
        by_id.insert(IdentityKey::String("sword".into()), Operation::Remove);

        let mut inner = CompoundDiff::new();
        inner.insert("name".into(), Operation::Replace(&name));

        let mut root = CompoundDiff::new();
        root.insert("player".into(), Operation::RecurseCompound(inner));
        root.insert("scores".into(), Operation::RecurseListByPosition(positions));
        root.insert("items".into(), Operation::RecurseListById(by_id));

        assert_eq!(
            root.write(""),
            "player.name = \"Steve\"\n\
             scores[2] = null\n\
             scores[3] = 5\n\
             items.sword = null\n"
        );
        assert_eq!(
            root.write("level"),
            "level.player.name = \"Steve\"\n\
             level.scores[2] = null\n\
             level.scores[3] = 5\n\
             level.items.sword = null\n"
        );
        assert_eq!(root.to_string(), root.write(""));
    }

    #[test]
    fn replace_renders_containers() {
        let value = Tag::Compound([("a", Tag::Byte(1))].into_iter().collect::<TagCompound>());
        let mut diff = CompoundDiff::new();
        diff.insert("k".into(), Operation::Replace(&value));
        assert_eq!(diff.write(""), "k = {a: 1b}\n");
    }

    #[test]
    fn kinds_name_each_variant() {
        assert_eq!(Operation::Remove.kind(), OperationKind::Remove);
        assert_eq!(
            Operation::RecurseListById(IdListDiff::new()).kind().to_string(),
            "list edit by identity"
        );
    }
}
