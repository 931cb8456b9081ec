//! Error types for merging and patch application.

use nbt::{TagError, TagType};
use thiserror::Error;

use crate::operation::OperationKind;

/// Failure while combining two diffs or applying the result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Both sides recurse into the same location with different strategies,
    /// e.g. one side diffed a list by identity and the other by position.
    #[error("cannot merge {left} with {right} at `{path}`")]
    IncompatibleOperations {
        path: String,
        left: OperationKind,
        right: OperationKind,
    },
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// A diff that does not fit the tree it is applied to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("no entry at `{path}` for {op}")]
    MissingKey { path: String, op: OperationKind },
    #[error("expected {expected} at `{path}`, found {found}")]
    KindMismatch {
        path: String,
        expected: TagType,
        found: TagType,
    },
    #[error("index {index} out of range at `{path}` (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
    #[error("no element at `{path}` to recurse into")]
    EmptySlot { path: String },
    #[error("at `{path}`: {source}")]
    Tag {
        path: String,
        #[source]
        source: TagError,
    },
}
