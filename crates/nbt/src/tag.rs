//! The recursive tag value.

use std::fmt;

use crate::compound::TagCompound;
use crate::list::TagList;
use crate::tag_type::TagType;

/// A node in an NBT tree.
///
/// `Clone` is a full deep copy: containers copy every descendant.
///
/// `PartialEq` is structural and exists for assertions; the merge engine
/// compares values with [`Tag::data_equal`] instead, which deliberately
/// does not define equality for containers.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(TagList),
    Compound(TagCompound),
    IntArray(Vec<i32>),
    Guid([u8; 16]),
}

impl Tag {
    pub fn kind(&self) -> TagType {
        match self {
            Tag::End => TagType::End,
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::String(_) => TagType::String,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
            Tag::IntArray(_) => TagType::IntArray,
            Tag::Guid(_) => TagType::Guid,
        }
    }

    /// Value equality for scalar and array kinds.
    ///
    /// Scalars compare by value (floats with IEEE `==`), arrays by length and
    /// element-wise. Lists and compounds are never `data_equal`, not even to
    /// themselves.
    pub fn data_equal(&self, other: &Tag) -> bool {
        match (self, other) {
            (Tag::End, Tag::End) => true,
            (Tag::Byte(a), Tag::Byte(b)) => a == b,
            (Tag::Short(a), Tag::Short(b)) => a == b,
            (Tag::Int(a), Tag::Int(b)) => a == b,
            (Tag::Long(a), Tag::Long(b)) => a == b,
            (Tag::Float(a), Tag::Float(b)) => a == b,
            (Tag::Double(a), Tag::Double(b)) => a == b,
            (Tag::String(a), Tag::String(b)) => a == b,
            (Tag::ByteArray(a), Tag::ByteArray(b)) => a == b,
            (Tag::IntArray(a), Tag::IntArray(b)) => a == b,
            (Tag::Guid(a), Tag::Guid(b)) => a == b,
            _ => false,
        }
    }

    /// Owned, fully independent copy of this tag and all descendants.
    pub fn deep_copy(&self) -> Tag {
        self.clone()
    }

    pub fn as_compound(&self) -> Option<&TagCompound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut TagCompound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&TagList> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut TagList> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    /// Widening integer view of Byte/Short/Int/Long tags.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Byte(v) => Some(i64::from(*v)),
            Tag::Short(v) => Some(i64::from(*v)),
            Tag::Int(v) => Some(i64::from(*v)),
            Tag::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Tag::Float(v) => Some(f64::from(*v)),
            Tag::Double(v) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────

impl From<i8> for Tag {
    fn from(v: i8) -> Self {
        Tag::Byte(v)
    }
}

impl From<i16> for Tag {
    fn from(v: i16) -> Self {
        Tag::Short(v)
    }
}

impl From<i32> for Tag {
    fn from(v: i32) -> Self {
        Tag::Int(v)
    }
}

impl From<i64> for Tag {
    fn from(v: i64) -> Self {
        Tag::Long(v)
    }
}

impl From<f32> for Tag {
    fn from(v: f32) -> Self {
        Tag::Float(v)
    }
}

impl From<f64> for Tag {
    fn from(v: f64) -> Self {
        Tag::Double(v)
    }
}

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Tag::String(v.to_string())
    }
}

impl From<String> for Tag {
    fn from(v: String) -> Self {
        Tag::String(v)
    }
}

impl From<Vec<u8>> for Tag {
    fn from(v: Vec<u8>) -> Self {
        Tag::ByteArray(v)
    }
}

impl From<Vec<i32>> for Tag {
    fn from(v: Vec<i32>) -> Self {
        Tag::IntArray(v)
    }
}

impl From<TagList> for Tag {
    fn from(v: TagList) -> Self {
        Tag::List(v)
    }
}

impl From<TagCompound> for Tag {
    fn from(v: TagCompound) -> Self {
        Tag::Compound(v)
    }
}

// ── Stringified rendering ─────────────────────────────────────────────────

/// Renders in stringified-NBT style: `1b`, `2s`, `3`, `4L`, `1.5f`, `2.5d`,
/// `"text"`, `[B; 1b]`, `[I; 1]`, `[a, b]`, `{k: v}`.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::End => f.write_str("null"),
            Tag::Byte(v) => write!(f, "{v}b"),
            Tag::Short(v) => write!(f, "{v}s"),
            Tag::Int(v) => write!(f, "{v}"),
            Tag::Long(v) => write!(f, "{v}L"),
            Tag::Float(v) => write!(f, "{v}f"),
            Tag::Double(v) => write!(f, "{v}d"),
            Tag::String(s) => write_quoted(f, s),
            Tag::ByteArray(bytes) => {
                f.write_str("[B;")?;
                for (i, b) in bytes.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{}b", *b as i8)?;
                }
                f.write_str("]")
            }
            Tag::IntArray(ints) => {
                f.write_str("[I;")?;
                for (i, v) in ints.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{v}")?;
                }
                f.write_str("]")
            }
            Tag::Guid(bytes) => {
                for (i, b) in bytes.iter().enumerate() {
                    if matches!(i, 4 | 6 | 8 | 10) {
                        f.write_str("-")?;
                    }
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Tag::List(list) => fmt::Display::fmt(list, f),
            Tag::Compound(compound) => fmt::Display::fmt(compound, f),
        }
    }
}

pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_compare_by_value() {
        assert!(Tag::Int(3).data_equal(&Tag::Int(3)));
        assert!(!Tag::Int(3).data_equal(&Tag::Int(4)));
        assert!(!Tag::Int(3).data_equal(&Tag::Long(3)));
        assert!(Tag::from("abc").data_equal(&Tag::from("abc")));
        assert!(Tag::Float(0.0).data_equal(&Tag::Float(-0.0)));
        assert!(!Tag::Double(f64::NAN).data_equal(&Tag::Double(f64::NAN)));
    }

    #[test]
    fn arrays_compare_element_wise() {
        assert!(Tag::IntArray(vec![1, 2]).data_equal(&Tag::IntArray(vec![1, 2])));
        assert!(!Tag::IntArray(vec![1, 2]).data_equal(&Tag::IntArray(vec![1, 2, 3])));
        assert!(!Tag::ByteArray(vec![1]).data_equal(&Tag::ByteArray(vec![2])));
    }

    #[test]
    fn containers_are_never_data_equal() {
        let c = Tag::Compound(TagCompound::new());
        assert!(!c.data_equal(&c.clone()));
        let l = Tag::List(TagList::new(TagType::Int));
        assert!(!l.data_equal(&l));
    }

    #[test]
    fn numeric_accessors_widen() {
        assert_eq!(Tag::Byte(-3).as_i64(), Some(-3));
        assert_eq!(Tag::Short(300).as_i64(), Some(300));
        assert_eq!(Tag::Long(i64::MIN).as_i64(), Some(i64::MIN));
        assert_eq!(Tag::Float(1.5).as_i64(), None);
        assert_eq!(Tag::from("7").as_i64(), None);

        assert_eq!(Tag::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Tag::Double(-0.25).as_f64(), Some(-0.25));
        assert_eq!(Tag::Int(4).as_f64(), Some(4.0));
        assert_eq!(Tag::IntArray(vec![1]).as_f64(), None);
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut inner = TagCompound::new();
        inner.insert("a", 1);
        let mut root = TagCompound::new();
        root.insert("inner", inner);
        let original = Tag::Compound(root);

        let mut copy = original.deep_copy();
        if let Some(inner) = copy
            .as_compound_mut()
            .and_then(|c| c.get_mut("inner"))
            .and_then(Tag::as_compound_mut)
        {
            inner.insert("a", 2);
        }

        let a = original
            .as_compound()
            .and_then(|c| c.get("inner"))
            .and_then(Tag::as_compound)
            .and_then(|c| c.get("a"));
        assert_eq!(a, Some(&Tag::Int(1)));
    }

    #[test]
    fn display_uses_stringified_suffixes() {
        assert_eq!(Tag::Byte(-1).to_string(), "-1b");
        assert_eq!(Tag::Short(2).to_string(), "2s");
        assert_eq!(Tag::Long(4).to_string(), "4L");
        assert_eq!(Tag::Float(1.5).to_string(), "1.5f");
        assert_eq!(Tag::Double(2.5).to_string(), "2.5d");
        assert_eq!(Tag::from("say \"hi\"").to_string(), r#""say \"hi\"""#);
        assert_eq!(Tag::ByteArray(vec![1, 255]).to_string(), "[B; 1b, -1b]");
        assert_eq!(Tag::IntArray(vec![]).to_string(), "[I;]");
        assert_eq!(
            Tag::Guid([0xab; 16]).to_string(),
            "abababab-abab-abab-abab-abababababab"
        );
    }
}
