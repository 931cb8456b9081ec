//! Tag kinds and their wire type codes.

use std::fmt;

/// The kind of an NBT tag.
///
/// The set is closed: decoding dispatches on this enum directly, there is no
/// runtime registry. [`TagType::Guid`] occupies the extension slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagType {
    /// Null tag, terminates compounds; also the element kind of untyped empty lists.
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    /// 16-byte GUID extension.
    Guid = 64,
}

impl TagType {
    /// Returns the wire type code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Maps a wire type code back to a kind.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TagType::End),
            1 => Some(TagType::Byte),
            2 => Some(TagType::Short),
            3 => Some(TagType::Int),
            4 => Some(TagType::Long),
            5 => Some(TagType::Float),
            6 => Some(TagType::Double),
            7 => Some(TagType::ByteArray),
            8 => Some(TagType::String),
            9 => Some(TagType::List),
            10 => Some(TagType::Compound),
            11 => Some(TagType::IntArray),
            64 => Some(TagType::Guid),
            _ => None,
        }
    }

    /// Lower-case name used by the JSON bridge and in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            TagType::End => "end",
            TagType::Byte => "byte",
            TagType::Short => "short",
            TagType::Int => "int",
            TagType::Long => "long",
            TagType::Float => "float",
            TagType::Double => "double",
            TagType::ByteArray => "byte_array",
            TagType::String => "string",
            TagType::List => "list",
            TagType::Compound => "compound",
            TagType::IntArray => "int_array",
            TagType::Guid => "guid",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "end" => Some(TagType::End),
            "byte" => Some(TagType::Byte),
            "short" => Some(TagType::Short),
            "int" => Some(TagType::Int),
            "long" => Some(TagType::Long),
            "float" => Some(TagType::Float),
            "double" => Some(TagType::Double),
            "byte_array" => Some(TagType::ByteArray),
            "string" => Some(TagType::String),
            "list" => Some(TagType::List),
            "compound" => Some(TagType::Compound),
            "int_array" => Some(TagType::IntArray),
            "guid" => Some(TagType::Guid),
            _ => None,
        }
    }

    /// True for kinds that hold other tags.
    pub fn is_container(self) -> bool {
        matches!(self, TagType::List | TagType::Compound)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
