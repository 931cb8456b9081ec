//! Binary NBT encoding and decoding.
//!
//! Layout of a named tree: `[10][u16 name length][name][compound payload]`.
//! A compound payload is a run of `[kind][u16 name length][name][payload]`
//! entries closed by a `0` byte. Lists are `[element kind][i32 length]`
//! followed by bare payloads; byte and int arrays are `[i32 length]`
//! followed by elements.

pub mod decoder;
pub mod encoder;

pub use decoder::NbtDecoder;
pub use encoder::NbtEncoder;

use crate::error::CodecError;
use crate::tree::NbtTree;

/// Maximum nesting of lists and compounds accepted by the decoder.
pub const MAX_DEPTH: usize = 512;

/// Decodes a named tree from `data`.
pub fn decode_tree(data: &[u8]) -> Result<NbtTree, CodecError> {
    NbtDecoder::new().decode(data)
}

/// Encodes a named tree to bytes.
pub fn encode_tree(tree: &NbtTree) -> Result<Vec<u8>, CodecError> {
    NbtEncoder::new().encode(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::TagCompound;
    use crate::list::TagList;
    use crate::tag::Tag;
    use crate::tag_type::TagType;

    #[test]
    fn encodes_hello_world_layout() {
        let mut root = TagCompound::new();
        root.insert("name", "Bananrama");
        let tree = NbtTree::named("hello world", root);
        let bytes = encode_tree(&tree).unwrap();

        let mut expected = vec![0x0a, 0x00, 0x0b];
        expected.extend_from_slice(b"hello world");
        expected.extend_from_slice(&[0x08, 0x00, 0x04]);
        expected.extend_from_slice(b"name");
        expected.extend_from_slice(&[0x00, 0x09]);
        expected.extend_from_slice(b"Bananrama");
        expected.push(0x00);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let mut inner = TagCompound::new();
        inner.insert("id", "minecraft:stone");
        inner.insert("Count", Tag::Byte(64));
        let mut items = TagList::new(TagType::Compound);
        items.push(inner).unwrap();

        let mut root = TagCompound::new();
        root.insert("items", items);
        root.insert("pos", Tag::IntArray(vec![1, -2, 3]));
        root.insert("blob", Tag::ByteArray(vec![0, 255]));
        root.insert("owner", Tag::Guid([7; 16]));
        root.insert("health", Tag::Float(19.5));
        root.insert("seed", Tag::Long(-42));
        root.insert("empty", TagList::new(TagType::End));
        let tree = NbtTree::named("Level", root);

        let bytes = encode_tree(&tree).unwrap();
        let mut decoder = NbtDecoder::new();
        assert_eq!(decoder.decode(&bytes).unwrap(), tree);
        assert_eq!(decoder.consumed(), bytes.len());
    }

    #[test]
    fn non_compound_header_yields_empty_tree() {
        let tree = decode_tree(&[0x01, 0x05]).unwrap();
        assert_eq!(tree, NbtTree::new());
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(decode_tree(&[]), Err(CodecError::UnexpectedEof));
        // root compound with a truncated name
        assert_eq!(
            decode_tree(&[0x0a, 0x00, 0x05, b'a']),
            Err(CodecError::UnexpectedEof)
        );
        // unknown entry type inside the root
        assert_eq!(
            decode_tree(&[0x0a, 0x00, 0x00, 0x2a]),
            Err(CodecError::UnknownType(0x2a))
        );
        // byte array with a negative length
        assert_eq!(
            decode_tree(&[
                0x0a, 0x00, 0x00, 0x07, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff,
            ]),
            Err(CodecError::NegativeLength(-1))
        );
        // int array claiming more elements than bytes remain
        assert_eq!(
            decode_tree(&[
                0x0a, 0x00, 0x00, 0x0b, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00,
            ]),
            Err(CodecError::UnexpectedEof)
        );
        // list of end tags with elements
        assert_eq!(
            decode_tree(&[
                0x0a, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00,
            ]),
            Err(CodecError::NonEmptyEndList(3))
        );
        // name that is not UTF-8
        assert_eq!(
            decode_tree(&[0x0a, 0x00, 0x01, 0xff, 0x00]),
            Err(CodecError::InvalidUtf8)
        );
    }

    #[test]
    fn rejects_excessive_nesting() {
        // root, then MAX_DEPTH + 1 nested compounds named ""
        let mut bytes = vec![0x0a, 0x00, 0x00];
        for _ in 0..=MAX_DEPTH {
            bytes.extend_from_slice(&[0x0a, 0x00, 0x00]);
        }
        assert_eq!(
            decode_tree(&bytes),
            Err(CodecError::DepthExceeded(MAX_DEPTH))
        );
    }

    #[test]
    fn payloads_have_no_name_header() {
        let encoder = NbtEncoder::new();
        let mut decoder = NbtDecoder::new();

        let bytes = encoder.encode_payload(&Tag::Int(5)).unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x05]);
        assert_eq!(
            decoder.decode_payload(TagType::Int, &bytes).unwrap(),
            Tag::Int(5)
        );

        let mut list = TagList::new(TagType::String);
        list.push("a").unwrap();
        let tag = Tag::List(list);
        let bytes = encoder.encode_payload(&tag).unwrap();
        assert_eq!(bytes, vec![0x08, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, b'a']);
        assert_eq!(decoder.decode_payload(TagType::List, &bytes).unwrap(), tag);
        assert_eq!(decoder.consumed(), bytes.len());

        assert_eq!(
            decoder.decode_payload(TagType::Long, &[0x00, 0x01]),
            Err(CodecError::UnexpectedEof)
        );
    }

    #[test]
    fn encoder_rejects_oversized_strings() {
        let mut root = TagCompound::new();
        root.insert("s", "x".repeat(70_000));
        let err = encode_tree(&NbtTree::with_root(root)).unwrap_err();
        assert_eq!(err, CodecError::StringTooLong(70_000));
    }

    #[test]
    fn end_entries_are_not_written() {
        let mut root = TagCompound::new();
        root.insert("gone", Tag::End);
        root.insert("kept", 1);
        let decoded = decode_tree(&encode_tree(&NbtTree::with_root(root)).unwrap()).unwrap();
        assert_eq!(decoded.root.keys().collect::<Vec<_>>(), vec!["kept"]);
    }
}
