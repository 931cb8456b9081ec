//! NBT decoder.
//!
//! NBT is a big-endian binary format. Every read is bounds-checked; list and
//! array lengths are validated against the remaining input before anything
//! is allocated.

use crate::compound::TagCompound;
use crate::error::CodecError;
use crate::list::TagList;
use crate::tag::Tag;
use crate::tag_type::TagType;
use crate::tree::NbtTree;

use super::MAX_DEPTH;

/// NBT tree decoder.
pub struct NbtDecoder {
    data: Vec<u8>,
    x: usize,
}

impl Default for NbtDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NbtDecoder {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            x: 0,
        }
    }

    /// Decodes a named root tree.
    ///
    /// A stream whose first byte is not the compound type code yields an
    /// empty, unnamed tree.
    pub fn decode(&mut self, data: &[u8]) -> Result<NbtTree, CodecError> {
        self.reset(data);
        let kind = self.u8()?;
        if kind != TagType::Compound.code() {
            return Ok(NbtTree::new());
        }
        let name = self.string()?;
        let root = self.compound(0)?;
        Ok(NbtTree::named(name, root))
    }

    /// Decodes a single payload of the given kind, with no name header.
    pub fn decode_payload(&mut self, kind: TagType, data: &[u8]) -> Result<Tag, CodecError> {
        self.reset(data);
        self.tag(kind, 0)
    }

    /// Number of bytes consumed by the last decode.
    pub fn consumed(&self) -> usize {
        self.x
    }

    fn reset(&mut self, data: &[u8]) {
        self.data = data.to_vec();
        self.x = 0;
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), CodecError> {
        match self.x.checked_add(n) {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(CodecError::UnexpectedEof),
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take::<1>()?[0])
    }

    fn i16_be(&mut self) -> Result<i16, CodecError> {
        Ok(i16::from_be_bytes(self.take()?))
    }

    fn u16_be(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    fn i32_be(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_be_bytes(self.take()?))
    }

    fn i64_be(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_be_bytes(self.take()?))
    }

    fn f32_be(&mut self) -> Result<f32, CodecError> {
        Ok(f32::from_be_bytes(self.take()?))
    }

    fn f64_be(&mut self) -> Result<f64, CodecError> {
        Ok(f64::from_be_bytes(self.take()?))
    }

    fn buf(&mut self, n: usize) -> Result<&[u8], CodecError> {
        self.check(n)?;
        let start = self.x;
        self.x += n;
        Ok(&self.data[start..start + n])
    }

    fn string(&mut self) -> Result<String, CodecError> {
        let len = self.u16_be()? as usize;
        let bytes = self.buf(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Reads an `i32` length prefix and checks that `len * width` bytes remain.
    fn length(&mut self, width: usize) -> Result<usize, CodecError> {
        let len = self.i32_be()?;
        if len < 0 {
            return Err(CodecError::NegativeLength(len));
        }
        let len = len as usize;
        self.check(len.saturating_mul(width))?;
        Ok(len)
    }

    fn kind(&mut self) -> Result<TagType, CodecError> {
        let code = self.u8()?;
        TagType::from_code(code).ok_or(CodecError::UnknownType(code))
    }

    fn tag(&mut self, kind: TagType, depth: usize) -> Result<Tag, CodecError> {
        Ok(match kind {
            TagType::End => Tag::End,
            TagType::Byte => Tag::Byte(self.u8()? as i8),
            TagType::Short => Tag::Short(self.i16_be()?),
            TagType::Int => Tag::Int(self.i32_be()?),
            TagType::Long => Tag::Long(self.i64_be()?),
            TagType::Float => Tag::Float(self.f32_be()?),
            TagType::Double => Tag::Double(self.f64_be()?),
            TagType::ByteArray => {
                let len = self.length(1)?;
                Tag::ByteArray(self.buf(len)?.to_vec())
            }
            TagType::String => Tag::String(self.string()?),
            TagType::IntArray => {
                let len = self.length(4)?;
                let mut ints = Vec::with_capacity(len);
                for _ in 0..len {
                    ints.push(self.i32_be()?);
                }
                Tag::IntArray(ints)
            }
            TagType::Guid => Tag::Guid(self.take()?),
            TagType::List => Tag::List(self.list(depth + 1)?),
            TagType::Compound => Tag::Compound(self.compound(depth + 1)?),
        })
    }

    fn list(&mut self, depth: usize) -> Result<TagList, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::DepthExceeded(MAX_DEPTH));
        }
        let kind = self.kind()?;
        // End elements occupy no bytes, so a non-empty End list would let a
        // four-byte length allocate without bound.
        let len = self.length(min_width(kind))?;
        if kind == TagType::End && len > 0 {
            return Err(CodecError::NonEmptyEndList(len));
        }
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.tag(kind, depth)?);
        }
        Ok(TagList::with_items(kind, items)?)
    }

    fn compound(&mut self, depth: usize) -> Result<TagCompound, CodecError> {
        if depth > MAX_DEPTH {
            return Err(CodecError::DepthExceeded(MAX_DEPTH));
        }
        let mut compound = TagCompound::new();
        loop {
            let kind = self.kind()?;
            if kind == TagType::End {
                break;
            }
            let name = self.string()?;
            let value = self.tag(kind, depth)?;
            compound.insert(name, value);
        }
        Ok(compound)
    }
}

/// Smallest encoded size of one payload of `kind`.
fn min_width(kind: TagType) -> usize {
    match kind {
        TagType::End => 0,
        TagType::Byte => 1,
        TagType::Short | TagType::String => 2,
        TagType::Int | TagType::Float | TagType::ByteArray | TagType::IntArray => 4,
        TagType::Long | TagType::Double => 8,
        TagType::List => 5,
        TagType::Compound => 1,
        TagType::Guid => 16,
    }
}
