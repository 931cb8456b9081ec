//! nbt — typed, hierarchical tag trees.
//!
//! The model has scalar tags, flat byte/int arrays, homogeneous ordered
//! lists and insertion-ordered compounds. Around it sit a big-endian binary
//! codec ([`codec`]) and a lossless typed JSON form ([`json`]).
//!
//! ```
//! use nbt::{Tag, TagCompound, TagList, TagType};
//!
//! let mut player = TagCompound::new();
//! player.insert("name", "Alex");
//! player.insert("xp", Tag::Long(1200));
//!
//! let mut scores = TagList::new(TagType::Int);
//! scores.push(10).unwrap();
//! assert!(scores.push("eleven").is_err());
//! player.insert("scores", scores);
//!
//! assert_eq!(player.to_string(), r#"{name: "Alex", xp: 1200L, scores: [10]}"#);
//! ```

pub mod codec;
pub mod compound;
pub mod error;
pub mod json;
pub mod list;
pub mod tag;
pub mod tag_type;
pub mod tree;

pub use compound::TagCompound;
pub use error::{CodecError, JsonError, TagError};
pub use list::TagList;
pub use tag::Tag;
pub use tag_type::TagType;
pub use tree::NbtTree;
