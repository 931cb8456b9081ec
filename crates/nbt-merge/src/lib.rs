//! nbt-merge — structural diff and three-way merge for tag trees.
//!
//! Given a common ancestor and two edited descendants, [`merge`] diffs each
//! side against the ancestor, unions the diffs and applies the result to a
//! copy of the ancestor. Where both sides touched the same entry, a removal
//! wins over a replacement, a replacement wins over a nested edit and the
//! right side wins between two replacements.
//!
//! Lists whose elements all carry an identity (strings, or compounds with an
//! `id`-like entry) are matched by identity. Every other list is matched by
//! position.
//!
//! ```
//! use nbt::{Tag, TagCompound};
//!
//! let ancestor: TagCompound = [("hp", Tag::Int(20)), ("xp", Tag::Int(0))].into_iter().collect();
//! let left: TagCompound = [("hp", Tag::Int(12)), ("xp", Tag::Int(0))].into_iter().collect();
//! let right: TagCompound = [("hp", Tag::Int(20)), ("xp", Tag::Int(7))].into_iter().collect();
//!
//! let merged = nbt_merge::merge(&ancestor, &left, &right).unwrap();
//! assert_eq!(merged.to_string(), "{hp: 12, xp: 7}");
//! ```

pub mod apply;
pub mod cli;
pub mod diff;
pub mod error;
pub mod identity;
pub mod lattice;
pub mod merge;
pub mod operation;

pub use diff::{are_identity_lists, diff, diff_value, Differ, IdentityListMode};
pub use error::{ApplyError, MergeError};
pub use identity::{compound_identity, identity_of, is_identity_key, IdentityKey};
pub use lattice::merge_operations;
pub use merge::{merge, merge_detailed, MergeOptions, MergeOutcome, Merger};
pub use operation::{
    CompoundDiff, DiffKey, IdListDiff, KeyedDiff, ListDiff, Operation, OperationKind,
};
