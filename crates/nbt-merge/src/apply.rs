//! Applying diffs to tag trees.
//!
//! Lists are edited as a vector of slots. An operation past the end pads
//! the vector with empty slots, `Remove` empties a slot, and once every
//! operation has run the empty slots are dropped so removals collapse the
//! list instead of leaving holes.

use nbt::{Tag, TagCompound, TagList, TagType};
use tracing::trace;

use crate::error::ApplyError;
use crate::identity::identity_of;
use crate::operation::{CompoundDiff, DiffKey, IdListDiff, KeyedDiff, ListDiff, Operation};

type Slots = Vec<Option<Tag>>;

impl<'a> CompoundDiff<'a> {
    /// Applies this diff to `target`. On error `target` is left untouched.
    pub fn apply(&self, target: &mut TagCompound) -> Result<(), ApplyError> {
        let mut work = target.clone();
        self.apply_in_place(&mut work, "")?;
        *target = work;
        Ok(())
    }

    pub(crate) fn apply_in_place(
        &self,
        target: &mut TagCompound,
        context: &str,
    ) -> Result<(), ApplyError> {
        for (key, op) in self {
            let path = key.path(context);
            trace!(path = %path, op = %op.kind(), "apply");
            match op {
                Operation::Remove => {
                    target.remove(key);
                }
                Operation::Replace(value) => {
                    target.insert(key.as_str(), (*value).clone());
                }
                _ => {
                    let existing = target.get_mut(key).ok_or_else(|| ApplyError::MissingKey {
                        path: path.clone(),
                        op: op.kind(),
                    })?;
                    apply_nested(op, existing, &path)?;
                }
            }
        }
        Ok(())
    }
}

impl<'a> ListDiff<'a> {
    /// Applies this diff to `target` by index. On error `target` is left
    /// untouched.
    pub fn apply(&self, target: &mut TagList) -> Result<(), ApplyError> {
        let mut work = target.clone();
        self.apply_in_place(&mut work, "")?;
        *target = work;
        Ok(())
    }

    pub(crate) fn apply_in_place(
        &self,
        target: &mut TagList,
        context: &str,
    ) -> Result<(), ApplyError> {
        let kind = rebuilt_kind(target, self);
        let mut slots: Slots = target.take_items().into_iter().map(Some).collect();
        for (index, op) in self {
            let path = index.path(context);
            trace!(path = %path, op = %op.kind(), "apply");
            apply_at(&mut slots, *index, op, kind, &path)?;
        }
        *target = collapse(kind, slots, context)?;
        Ok(())
    }
}

impl<'a> IdListDiff<'a> {
    /// Applies this diff to `target`, locating elements by identity. On
    /// error `target` is left untouched.
    pub fn apply(&self, target: &mut TagList) -> Result<(), ApplyError> {
        let mut work = target.clone();
        self.apply_in_place(&mut work, "")?;
        *target = work;
        Ok(())
    }

    pub(crate) fn apply_in_place(
        &self,
        target: &mut TagList,
        context: &str,
    ) -> Result<(), ApplyError> {
        let kind = rebuilt_kind(target, self);
        let mut slots: Slots = target.take_items().into_iter().map(Some).collect();
        for (key, op) in self {
            let path = key.path(context);
            trace!(path = %path, op = %op.kind(), "apply");
            let found = slots
                .iter()
                .position(|slot| slot.as_ref().and_then(identity_of).as_ref() == Some(key));
            let index = match found {
                Some(index) => index,
                None => {
                    slots.push(None);
                    slots.len() - 1
                }
            };
            apply_at(&mut slots, index, op, kind, &path)?;
        }
        *target = collapse(kind, slots, context)?;
        Ok(())
    }
}

/// Runs a recursive operation against an existing value.
fn apply_nested(op: &Operation<'_>, target: &mut Tag, path: &str) -> Result<(), ApplyError> {
    match op {
        Operation::RecurseCompound(sub) => {
            let found = target.kind();
            let compound = target
                .as_compound_mut()
                .ok_or_else(|| mismatch(path, TagType::Compound, found))?;
            sub.apply_in_place(compound, path)
        }
        Operation::RecurseListById(sub) => {
            let found = target.kind();
            let list = target.as_list_mut().ok_or_else(|| mismatch(path, TagType::List, found))?;
            sub.apply_in_place(list, path)
        }
        Operation::RecurseListByPosition(sub) => {
            let found = target.kind();
            let list = target.as_list_mut().ok_or_else(|| mismatch(path, TagType::List, found))?;
            sub.apply_in_place(list, path)
        }
        // Leaf edits are handled by the owning container.
        Operation::Remove | Operation::Replace(_) => Ok(()),
    }
}

/// Element kind the list is rebuilt with. An empty `End` list, as decoded
/// from the wire, takes the kind of the first value written into it.
fn rebuilt_kind<K: DiffKey>(target: &TagList, diff: &KeyedDiff<'_, K>) -> TagType {
    let kind = target.element_kind();
    if kind != TagType::End || !target.is_empty() {
        return kind;
    }
    diff.iter()
        .find_map(|(_, op)| match op {
            Operation::Replace(value) => Some(value.kind()),
            _ => None,
        })
        .unwrap_or(kind)
}

fn apply_at(
    slots: &mut Slots,
    index: usize,
    op: &Operation<'_>,
    kind: TagType,
    path: &str,
) -> Result<(), ApplyError> {
    match op {
        Operation::Remove => {
            let len = slots.len();
            let slot = slots.get_mut(index).ok_or_else(|| ApplyError::IndexOutOfRange {
                path: path.to_string(),
                index,
                len,
            })?;
            *slot = None;
        }
        Operation::Replace(value) => {
            if value.kind() != kind {
                return Err(mismatch(path, kind, value.kind()));
            }
            if index >= slots.len() {
                slots.resize_with(index + 1, || None);
            }
            slots[index] = Some((*value).clone());
        }
        _ => {
            let len = slots.len();
            match slots.get_mut(index) {
                None => {
                    return Err(ApplyError::IndexOutOfRange {
                        path: path.to_string(),
                        index,
                        len,
                    })
                }
                Some(None) => {
                    return Err(ApplyError::EmptySlot {
                        path: path.to_string(),
                    })
                }
                Some(Some(existing)) => apply_nested(op, existing, path)?,
            }
        }
    }
    Ok(())
}

fn collapse(kind: TagType, slots: Slots, path: &str) -> Result<TagList, ApplyError> {
    let items = slots.into_iter().flatten().collect();
    TagList::with_items(kind, items).map_err(|source| ApplyError::Tag {
        path: path.to_string(),
        source,
    })
}

fn mismatch(path: &str, expected: TagType, found: TagType) -> ApplyError {
    ApplyError::KindMismatch {
        path: path.to_string(),
        expected,
        found,
    }
}
