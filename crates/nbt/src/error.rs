//! Error types for the tag model, the wire codec and the JSON bridge.

use thiserror::Error;

use crate::tag_type::TagType;

/// Misuse of the tag model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("list holds {expected} elements, got {found}")]
    ElementKind { expected: TagType, found: TagType },
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Error type for binary decoding and encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected tag type: {0}")]
    UnknownType(u8),
    #[error("negative length: {0}")]
    NegativeLength(i32),
    #[error("list of end tags declares {0} elements")]
    NonEmptyEndList(usize),
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("string of {0} bytes exceeds the 65535 byte limit")]
    StringTooLong(usize),
    #[error("sequence of {0} elements exceeds the i32 length limit")]
    TooManyElements(usize),
    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),
    #[error(transparent)]
    Tag(#[from] TagError),
}

/// Error type for the typed JSON bridge.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid tag JSON at {path}: {reason}")]
    Invalid { path: String, reason: String },
    #[error(transparent)]
    Tag(#[from] TagError),
}

impl JsonError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        JsonError::Invalid {
            path: if path.is_empty() { "$".to_string() } else { path.to_string() },
            reason: reason.into(),
        }
    }
}
