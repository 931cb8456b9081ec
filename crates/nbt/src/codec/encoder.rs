//! NBT encoder.
//!
//! All multi-byte values are written big-endian.

use crate::compound::TagCompound;
use crate::error::CodecError;
use crate::list::TagList;
use crate::tag::Tag;
use crate::tag_type::TagType;
use crate::tree::NbtTree;

/// Encodes named NBT trees to bytes.
pub struct NbtEncoder;

impl Default for NbtEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NbtEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes `tree` with its compound header and name.
    pub fn encode(&self, tree: &NbtTree) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        buf.push(TagType::Compound.code());
        self.write_string(&mut buf, &tree.name)?;
        self.write_compound(&mut buf, &tree.root)?;
        Ok(buf)
    }

    /// Encodes a single payload with no name header.
    pub fn encode_payload(&self, tag: &Tag) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        self.write_tag(&mut buf, tag)?;
        Ok(buf)
    }

    fn write_tag(&self, buf: &mut Vec<u8>, tag: &Tag) -> Result<(), CodecError> {
        match tag {
            Tag::End => {}
            Tag::Byte(v) => buf.push(*v as u8),
            Tag::Short(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Tag::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Tag::Long(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Tag::Float(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Tag::Double(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Tag::ByteArray(bytes) => {
                self.write_len(buf, bytes.len())?;
                buf.extend_from_slice(bytes);
            }
            Tag::String(s) => self.write_string(buf, s)?,
            Tag::IntArray(ints) => {
                self.write_len(buf, ints.len())?;
                for v in ints {
                    buf.extend_from_slice(&v.to_be_bytes());
                }
            }
            Tag::Guid(bytes) => buf.extend_from_slice(bytes),
            Tag::List(list) => self.write_list(buf, list)?,
            Tag::Compound(compound) => self.write_compound(buf, compound)?,
        }
        Ok(())
    }

    fn write_list(&self, buf: &mut Vec<u8>, list: &TagList) -> Result<(), CodecError> {
        buf.push(list.element_kind().code());
        self.write_len(buf, list.len())?;
        for item in list {
            self.write_tag(buf, item)?;
        }
        Ok(())
    }

    /// End-valued entries are skipped: an End byte terminates the compound.
    fn write_compound(&self, buf: &mut Vec<u8>, compound: &TagCompound) -> Result<(), CodecError> {
        for (key, value) in compound {
            if value.kind() == TagType::End {
                continue;
            }
            buf.push(value.kind().code());
            self.write_string(buf, key)?;
            self.write_tag(buf, value)?;
        }
        buf.push(TagType::End.code());
        Ok(())
    }

    fn write_len(&self, buf: &mut Vec<u8>, len: usize) -> Result<(), CodecError> {
        let len = i32::try_from(len).map_err(|_| CodecError::TooManyElements(len))?;
        buf.extend_from_slice(&len.to_be_bytes());
        Ok(())
    }

    fn write_string(&self, buf: &mut Vec<u8>, s: &str) -> Result<(), CodecError> {
        let len = u16::try_from(s.len()).map_err(|_| CodecError::StringTooLong(s.len()))?;
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
