//! Structural diff between two tag trees.
//!
//! `diff(first, second)` describes the edit that turns `first` into
//! `second`. Compounds are compared key by key. Lists are compared either by
//! element identity (when every element on both sides has one) or by
//! position.

use std::fmt;
use std::str::FromStr;

use nbt::{Tag, TagCompound, TagList, TagType};
use serde::{Deserialize, Serialize};

use crate::identity::{compound_identity, find_with_identity, identity_of};
use crate::operation::{CompoundDiff, IdListDiff, ListDiff, Operation};

/// How identity-matched lists are diffed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityListMode {
    /// Matched elements get their precise recursive diff and elements that
    /// only exist in the second list are added.
    #[default]
    Precise,
    /// Every matched element is replaced wholesale, and elements that only
    /// exist in the second list are ignored.
    Legacy,
}

impl IdentityListMode {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentityListMode::Precise => "precise",
            IdentityListMode::Legacy => "legacy",
        }
    }
}

impl fmt::Display for IdentityListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityListMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "precise" => Ok(IdentityListMode::Precise),
            "legacy" => Ok(IdentityListMode::Legacy),
            other => Err(format!(
                "unknown identity list mode `{other}` (expected precise or legacy)"
            )),
        }
    }
}

/// Computes diffs under a fixed [`IdentityListMode`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    mode: IdentityListMode,
}

impl Differ {
    pub fn new(mode: IdentityListMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> IdentityListMode {
        self.mode
    }

    /// Edit turning `first` into `second`. Keys without an effective change
    /// are omitted; keys only in `second` come last, in `second`'s order.
    pub fn diff<'a>(&self, first: &TagCompound, second: &'a TagCompound) -> CompoundDiff<'a> {
        let mut diff = CompoundDiff::new();
        for (key, value) in first {
            if let Some(op) = self.diff_value(Some(value), second.get(key)) {
                diff.insert(key.clone(), op);
            }
        }
        for (key, value) in second {
            if !first.contains_key(key) {
                diff.insert(key.clone(), Operation::Replace(value));
            }
        }
        diff
    }

    /// Edit turning `a` into `b`, or `None` when they are the same.
    pub fn diff_value<'a>(
        &self,
        a: Option<&Tag>,
        b: Option<&'a Tag>,
    ) -> Option<Operation<'a>> {
        let (a, b) = match (a, b) {
            (None, None) => return None,
            (Some(_), None) => return Some(Operation::Remove),
            (None, Some(b)) => return Some(Operation::Replace(b)),
            (Some(a), Some(b)) => (a, b),
        };
        match (a, b) {
            (Tag::Compound(ca), Tag::Compound(cb)) => {
                let sub = self.diff(ca, cb);
                (!sub.is_empty()).then_some(Operation::RecurseCompound(sub))
            }
            (Tag::List(la), Tag::List(lb)) => {
                // A change of declared element kind cannot be expressed
                // element by element, unless the first list is an untyped
                // empty list being filled.
                if la.element_kind() != lb.element_kind() && !fills_untyped(la, lb) {
                    return Some(Operation::Replace(b));
                }
                if are_identity_lists(la, lb) {
                    let sub = self.id_diff(la, lb);
                    (!sub.is_empty()).then_some(Operation::RecurseListById(sub))
                } else {
                    let sub = self.position_diff(la, lb);
                    (!sub.is_empty()).then_some(Operation::RecurseListByPosition(sub))
                }
            }
            _ if a.kind() != b.kind() => Some(Operation::Replace(b)),
            _ => (!a.data_equal(b)).then_some(Operation::Replace(b)),
        }
    }

    /// Identity-keyed diff of two lists whose elements all carry identities.
    pub fn id_diff<'a>(&self, a: &TagList, b: &'a TagList) -> IdListDiff<'a> {
        let mut diff = IdListDiff::new();
        for item in a {
            let Some(key) = identity_of(item) else { continue };
            let counterpart = find_with_identity(b.as_slice(), &key);
            if let Some(op) = self.diff_value(Some(item), counterpart) {
                diff.insert(key, op);
            }
        }

        for item in b {
            let Some(key) = identity_of(item) else { continue };
            let in_first = find_with_identity(a.as_slice(), &key).is_some();
            match self.mode {
                IdentityListMode::Precise => {
                    if !in_first && !diff.contains_key(&key) {
                        diff.insert(key, Operation::Replace(item));
                    }
                }
                IdentityListMode::Legacy => {
                    if in_first {
                        diff.insert(key, Operation::Replace(item));
                    }
                }
            }
        }
        diff
    }

    /// Index-keyed diff; indices past either end count as absent.
    pub fn position_diff<'a>(&self, a: &TagList, b: &'a TagList) -> ListDiff<'a> {
        let mut diff = ListDiff::new();
        for i in 0..a.len().max(b.len()) {
            if let Some(op) = self.diff_value(a.get(i), b.get(i)) {
                diff.insert(i, op);
            }
        }
        diff
    }
}

/// True when both lists should be matched by identity: every element on
/// both sides is a string, or every element on both sides is a compound
/// with an identity.
pub fn are_identity_lists(a: &TagList, b: &TagList) -> bool {
    let mut all_strings = true;
    let mut all_identified = true;
    for item in a.iter().chain(b.iter()) {
        if item.kind() != TagType::String {
            all_strings = false;
        }
        match item {
            Tag::Compound(c) if compound_identity(c).is_some() => {}
            _ => all_identified = false,
        }
        if !all_strings && !all_identified {
            return false;
        }
    }
    true
}

/// An empty list read from the wire declares `End`; giving it elements is
/// not a change of kind.
fn fills_untyped(a: &TagList, b: &TagList) -> bool {
    a.is_empty() && a.element_kind() == TagType::End && !b.is_empty()
}

/// Edit turning `first` into `second`, with precise identity-list handling.
pub fn diff<'a>(first: &TagCompound, second: &'a TagCompound) -> CompoundDiff<'a> {
    Differ::default().diff(first, second)
}

/// Edit turning `a` into `b`, with precise identity-list handling.
pub fn diff_value<'a>(a: Option<&Tag>, b: Option<&'a Tag>) -> Option<Operation<'a>> {
    Differ::default().diff_value(a, b)
}
