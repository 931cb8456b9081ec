//! Combining two diffs computed against the same ancestor.
//!
//! Where both sides touch the same location the outcome is decided by a
//! fixed precedence: a removal on either side wins, then a wholesale
//! replacement (the right side's when both replace), and only when both
//! sides recurse with the same strategy are the nested diffs merged.

use tracing::trace;

use crate::error::MergeError;
use crate::operation::{DiffKey, KeyedDiff, Operation};

/// Combines the operations both sides recorded at `path`.
pub fn merge_operations<'a>(
    left: &Operation<'a>,
    right: &Operation<'a>,
    path: &str,
) -> Result<Operation<'a>, MergeError> {
    let merged = match (left, right) {
        (_, Operation::Remove) | (Operation::Remove, _) => Operation::Remove,
        (_, Operation::Replace(value)) | (Operation::Replace(value), _) => {
            Operation::Replace(*value)
        }
        (Operation::RecurseCompound(l), Operation::RecurseCompound(r)) => {
            Operation::RecurseCompound(KeyedDiff::merge_at(l, r, path)?)
        }
        (Operation::RecurseListById(l), Operation::RecurseListById(r)) => {
            Operation::RecurseListById(KeyedDiff::merge_at(l, r, path)?)
        }
        (Operation::RecurseListByPosition(l), Operation::RecurseListByPosition(r)) => {
            Operation::RecurseListByPosition(KeyedDiff::merge_at(l, r, path)?)
        }
        (l, r) => {
            return Err(MergeError::IncompatibleOperations {
                path: path.to_string(),
                left: l.kind(),
                right: r.kind(),
            })
        }
    };
    trace!(
        path,
        left = %left.kind(),
        right = %right.kind(),
        merged = %merged.kind(),
        "conflict resolved"
    );
    Ok(merged)
}

impl<'a, K: DiffKey> KeyedDiff<'a, K> {
    /// Union of two diffs. Left's keys come first in left's order, then the
    /// keys only right touched in right's order. Keys on both sides are
    /// resolved by [`merge_operations`].
    pub fn merge(left: &Self, right: &Self) -> Result<Self, MergeError> {
        Self::merge_at(left, right, "")
    }

    pub(crate) fn merge_at(left: &Self, right: &Self, context: &str) -> Result<Self, MergeError> {
        let mut merged = Self::new();
        for (key, op) in left {
            let op = match right.get(key) {
                Some(other) => merge_operations(op, other, &key.path(context))?,
                None => op.clone(),
            };
            merged.insert(key.clone(), op);
        }
        for (key, op) in right {
            if !left.contains_key(key) {
                merged.insert(key.clone(), op.clone());
            }
        }
        Ok(merged)
    }
}
