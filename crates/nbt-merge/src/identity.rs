//! List-element identity.
//!
//! A compound's identity is the value of its first entry whose key looks
//! like an identifier (`id`, `ID`, `uid`, `itemId`, `mobID`, ...). A string
//! element is its own identity. Anything else has none.

use std::fmt;
use std::sync::OnceLock;

use nbt::{Tag, TagCompound};
use regex::Regex;

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:id|Id|ID|\wid|\w+(?:Id|ID))$").expect("identity pattern is a valid regex")
    })
}

/// True when `key` names an identity entry.
pub fn is_identity_key(key: &str) -> bool {
    id_pattern().is_match(key)
}

/// A hashable identity value extracted from a list element.
///
/// Floats compare by bit pattern so that keys can live in a hash map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(u32),
    Double(u64),
    String(String),
    ByteArray(Vec<u8>),
    IntArray(Vec<i32>),
    Guid([u8; 16]),
}

impl IdentityKey {
    /// Wraps a scalar or array value. Containers and `End` cannot act as
    /// identities.
    pub fn from_value(tag: &Tag) -> Option<Self> {
        Some(match tag {
            Tag::Byte(v) => IdentityKey::Byte(*v),
            Tag::Short(v) => IdentityKey::Short(*v),
            Tag::Int(v) => IdentityKey::Int(*v),
            Tag::Long(v) => IdentityKey::Long(*v),
            Tag::Float(v) => IdentityKey::Float(v.to_bits()),
            Tag::Double(v) => IdentityKey::Double(v.to_bits()),
            Tag::String(s) => IdentityKey::String(s.clone()),
            Tag::ByteArray(b) => IdentityKey::ByteArray(b.clone()),
            Tag::IntArray(i) => IdentityKey::IntArray(i.clone()),
            Tag::Guid(g) => IdentityKey::Guid(*g),
            Tag::End | Tag::List(_) | Tag::Compound(_) => return None,
        })
    }

    pub fn to_tag(&self) -> Tag {
        match self {
            IdentityKey::Byte(v) => Tag::Byte(*v),
            IdentityKey::Short(v) => Tag::Short(*v),
            IdentityKey::Int(v) => Tag::Int(*v),
            IdentityKey::Long(v) => Tag::Long(*v),
            IdentityKey::Float(bits) => Tag::Float(f32::from_bits(*bits)),
            IdentityKey::Double(bits) => Tag::Double(f64::from_bits(*bits)),
            IdentityKey::String(s) => Tag::String(s.clone()),
            IdentityKey::ByteArray(b) => Tag::ByteArray(b.clone()),
            IdentityKey::IntArray(i) => Tag::IntArray(i.clone()),
            IdentityKey::Guid(g) => Tag::Guid(*g),
        }
    }
}

/// Strings render bare, everything else in stringified-tag form.
impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::String(s) => f.write_str(s),
            other => fmt::Display::fmt(&other.to_tag(), f),
        }
    }
}

/// Identity of a compound: the first identifier-like entry, if it holds a
/// scalar or array.
pub fn compound_identity(compound: &TagCompound) -> Option<IdentityKey> {
    let (_, value) = compound.iter().find(|(key, _)| is_identity_key(key))?;
    IdentityKey::from_value(value)
}

/// Identity of a list element.
pub fn identity_of(tag: &Tag) -> Option<IdentityKey> {
    match tag {
        Tag::Compound(c) => compound_identity(c),
        Tag::String(s) => Some(IdentityKey::String(s.clone())),
        _ => None,
    }
}

/// First element carrying `key`. Later duplicates are never reached.
pub fn find_with_identity<'a>(items: &'a [Tag], key: &IdentityKey) -> Option<&'a Tag> {
    items.iter().find(|t| identity_of(t).as_ref() == Some(key))
}
