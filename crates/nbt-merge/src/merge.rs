//! Three-way merge of tag trees.

use nbt::TagCompound;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diff::{Differ, IdentityListMode};
use crate::error::MergeError;
use crate::operation::CompoundDiff;

/// Tunables for [`Merger`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeOptions {
    pub identity_lists: IdentityListMode,
}

/// Result of [`Merger::merge_detailed`]: the merged tree plus every diff
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome<'a> {
    pub result: TagCompound,
    /// Ancestor to left.
    pub left_diff: CompoundDiff<'a>,
    /// Ancestor to right.
    pub right_diff: CompoundDiff<'a>,
    /// Union of both sides after conflict resolution.
    pub merged_diff: CompoundDiff<'a>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> MergeOptions {
        self.options
    }

    /// Merges the edits `left` and `right` made to `ancestor`. None of the
    /// inputs are modified.
    pub fn merge(
        &self,
        ancestor: &TagCompound,
        left: &TagCompound,
        right: &TagCompound,
    ) -> Result<TagCompound, MergeError> {
        self.merge_detailed(ancestor, left, right).map(|outcome| outcome.result)
    }

    pub fn merge_detailed<'a>(
        &self,
        ancestor: &TagCompound,
        left: &'a TagCompound,
        right: &'a TagCompound,
    ) -> Result<MergeOutcome<'a>, MergeError> {
        let differ = Differ::new(self.options.identity_lists);
        let left_diff = differ.diff(ancestor, left);
        let right_diff = differ.diff(ancestor, right);
        debug!(
            mode = %self.options.identity_lists,
            left = left_diff.len(),
            right = right_diff.len(),
            "merging diffs"
        );

        let merged_diff = CompoundDiff::merge(&left_diff, &right_diff)?;
        let mut result = ancestor.deep_copy();
        merged_diff.apply_in_place(&mut result, "")?;
        debug!(operations = merged_diff.len(), entries = result.len(), "merge applied");

        Ok(MergeOutcome {
            result,
            left_diff,
            right_diff,
            merged_diff,
        })
    }
}

/// Merges with default options.
pub fn merge(
    ancestor: &TagCompound,
    left: &TagCompound,
    right: &TagCompound,
) -> Result<TagCompound, MergeError> {
    Merger::default().merge(ancestor, left, right)
}

/// Like [`merge`], also returning the diffs.
pub fn merge_detailed<'a>(
    ancestor: &TagCompound,
    left: &'a TagCompound,
    right: &'a TagCompound,
) -> Result<MergeOutcome<'a>, MergeError> {
    Merger::default().merge_detailed(ancestor, left, right)
}
