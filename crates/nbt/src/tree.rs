//! Named root of an NBT document.

use crate::codec::{decode_tree, encode_tree};
use crate::compound::TagCompound;
use crate::error::CodecError;

/// A complete NBT document: a root compound plus the root's name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtTree {
    pub name: String,
    pub root: TagCompound,
}

impl NbtTree {
    /// Empty, unnamed tree.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: TagCompound) -> Self {
        Self {
            name: String::new(),
            root,
        }
    }

    pub fn named(name: impl Into<String>, root: TagCompound) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        decode_tree(data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        encode_tree(self)
    }
}
