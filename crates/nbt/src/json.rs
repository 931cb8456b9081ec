//! Typed JSON form of tag trees.
//!
//! Every tag becomes a single-key object naming its kind, so the mapping is
//! lossless in both directions:
//!
//! ```
//! use nbt::json::{from_json, to_json};
//! use serde_json::json;
//!
//! let value = json!({"compound": {
//!     "name": {"string": "Steve"},
//!     "inventory": {"list": {"of": "compound", "items": [
//!         {"compound": {"id": {"short": 1}, "Count": {"byte": 3}}}
//!     ]}},
//!     "pos": {"int_array": [1, 64, -3]}
//! }});
//! let tag = from_json(&value).unwrap();
//! assert_eq!(to_json(&tag), value);
//! ```
//!
//! Byte arrays are base64 strings, GUIDs are hex strings, and non-finite
//! floats are written as `"NaN"`, `"inf"` or `"-inf"`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Number, Value};

use crate::compound::TagCompound;
use crate::error::JsonError;
use crate::list::TagList;
use crate::tag::Tag;
use crate::tag_type::TagType;
use crate::tree::NbtTree;

// ── Serialization ─────────────────────────────────────────────────────────

/// Converts a tag to its typed JSON form.
pub fn to_json(tag: &Tag) -> Value {
    let payload = match tag {
        Tag::End => Value::Null,
        Tag::Byte(v) => json!(v),
        Tag::Short(v) => json!(v),
        Tag::Int(v) => json!(v),
        Tag::Long(v) => json!(v),
        Tag::Float(v) => float_to_json(f64::from(*v)),
        Tag::Double(v) => float_to_json(*v),
        Tag::ByteArray(bytes) => Value::String(STANDARD.encode(bytes)),
        Tag::String(s) => Value::String(s.clone()),
        Tag::IntArray(ints) => json!(ints),
        Tag::Guid(_) => Value::String(tag.to_string()),
        Tag::List(list) => json!({
            "of": list.element_kind().as_str(),
            "items": list.iter().map(to_json).collect::<Vec<_>>(),
        }),
        Tag::Compound(compound) => Value::Object(compound_entries(compound)),
    };
    let mut obj = Map::with_capacity(1);
    obj.insert(tag.kind().as_str().to_string(), payload);
    Value::Object(obj)
}

/// Converts a compound to its typed JSON form (`{"compound": {...}}`).
pub fn compound_to_json(compound: &TagCompound) -> Value {
    json!({ "compound": compound_entries(compound) })
}

/// Converts a tree to `{"name": ..., "root": {<entries>}}`.
pub fn tree_to_json(tree: &NbtTree) -> Value {
    json!({
        "name": tree.name,
        "root": compound_entries(&tree.root),
    })
}

fn compound_entries(compound: &TagCompound) -> Map<String, Value> {
    compound.iter().map(|(k, v)| (k.clone(), to_json(v))).collect()
}

fn float_to_json(v: f64) -> Value {
    match Number::from_f64(v) {
        Some(n) => Value::Number(n),
        None if v.is_nan() => Value::String("NaN".into()),
        None if v > 0.0 => Value::String("inf".into()),
        None => Value::String("-inf".into()),
    }
}

// ── Deserialization ───────────────────────────────────────────────────────

/// Parses a tag from its typed JSON form.
pub fn from_json(value: &Value) -> Result<Tag, JsonError> {
    tag_at("", value)
}

/// Parses `{"compound": {...}}` into a compound.
pub fn compound_from_json(value: &Value) -> Result<TagCompound, JsonError> {
    match from_json(value)? {
        Tag::Compound(c) => Ok(c),
        other => Err(JsonError::invalid("", format!("expected compound, found {}", other.kind()))),
    }
}

/// Parses `{"name": ..., "root": {<entries>}}` into a tree.
pub fn tree_from_json(value: &Value) -> Result<NbtTree, JsonError> {
    let obj = value
        .as_object()
        .ok_or_else(|| JsonError::invalid("", "tree must be an object"))?;
    let name = match obj.get("name") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(JsonError::invalid("name", "must be a string")),
    };
    let entries = obj
        .get("root")
        .and_then(Value::as_object)
        .ok_or_else(|| JsonError::invalid("root", "must be an object of entries"))?;
    Ok(NbtTree::named(name, compound_at("root", entries)?))
}

/// Parses a tree from JSON text.
pub fn tree_from_str(text: &str) -> Result<NbtTree, JsonError> {
    let value: Value = serde_json::from_str(text)?;
    tree_from_json(&value)
}

fn tag_at(path: &str, value: &Value) -> Result<Tag, JsonError> {
    let obj = value
        .as_object()
        .filter(|o| o.len() == 1)
        .ok_or_else(|| {
            JsonError::invalid(path, "tag must be an object with exactly one kind key")
        })?;
    let (name, payload) = obj
        .iter()
        .next()
        .ok_or_else(|| JsonError::invalid(path, "empty tag object"))?;
    let kind = TagType::from_name(name)
        .ok_or_else(|| JsonError::invalid(path, format!("unknown tag kind `{name}`")))?;
    payload_at(path, kind, payload)
}

fn payload_at(path: &str, kind: TagType, payload: &Value) -> Result<Tag, JsonError> {
    Ok(match kind {
        TagType::End => match payload {
            Value::Null => Tag::End,
            _ => return Err(JsonError::invalid(path, "end payload must be null")),
        },
        TagType::Byte => Tag::Byte(int_in_range(path, payload)?),
        TagType::Short => Tag::Short(int_in_range(path, payload)?),
        TagType::Int => Tag::Int(int_in_range(path, payload)?),
        TagType::Long => Tag::Long(int_in_range(path, payload)?),
        TagType::Float => Tag::Float(float_at(path, payload)? as f32),
        TagType::Double => Tag::Double(float_at(path, payload)?),
        TagType::ByteArray => {
            let s = payload
                .as_str()
                .ok_or_else(|| JsonError::invalid(path, "byte_array must be a base64 string"))?;
            Tag::ByteArray(
                STANDARD
                    .decode(s)
                    .map_err(|e| JsonError::invalid(path, format!("bad base64: {e}")))?,
            )
        }
        TagType::String => Tag::String(
            payload
                .as_str()
                .ok_or_else(|| JsonError::invalid(path, "string payload must be a string"))?
                .to_string(),
        ),
        TagType::IntArray => {
            let arr = payload
                .as_array()
                .ok_or_else(|| JsonError::invalid(path, "int_array must be an array"))?;
            let mut ints = Vec::with_capacity(arr.len());
            for (i, v) in arr.iter().enumerate() {
                ints.push(int_in_range(&format!("{path}[{i}]"), v)?);
            }
            Tag::IntArray(ints)
        }
        TagType::Guid => Tag::Guid(guid_at(path, payload)?),
        TagType::List => Tag::List(list_at(path, payload)?),
        TagType::Compound => {
            let entries = payload
                .as_object()
                .ok_or_else(|| JsonError::invalid(path, "compound payload must be an object"))?;
            Tag::Compound(compound_at(path, entries)?)
        }
    })
}

fn compound_at(path: &str, entries: &Map<String, Value>) -> Result<TagCompound, JsonError> {
    let mut compound = TagCompound::new();
    for (key, value) in entries {
        let child = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
        compound.insert(key.clone(), tag_at(&child, value)?);
    }
    Ok(compound)
}

fn list_at(path: &str, payload: &Value) -> Result<TagList, JsonError> {
    let of = payload
        .get("of")
        .and_then(Value::as_str)
        .ok_or_else(|| JsonError::invalid(path, "list needs an `of` element kind"))?;
    let kind = TagType::from_name(of)
        .ok_or_else(|| JsonError::invalid(path, format!("unknown element kind `{of}`")))?;
    let items = match payload.get("items") {
        None => &[][..],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => return Err(JsonError::invalid(path, "list `items` must be an array")),
    };
    let mut list = TagList::new(kind);
    for (i, item) in items.iter().enumerate() {
        list.push(tag_at(&format!("{path}[{i}]"), item)?)?;
    }
    Ok(list)
}

fn int_in_range<T: TryFrom<i64>>(path: &str, payload: &Value) -> Result<T, JsonError> {
    let v = payload
        .as_i64()
        .ok_or_else(|| JsonError::invalid(path, "expected an integer"))?;
    T::try_from(v).map_err(|_| JsonError::invalid(path, format!("{v} out of range")))
}

fn float_at(path: &str, payload: &Value) -> Result<f64, JsonError> {
    match payload {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| JsonError::invalid(path, "expected a number")),
        Value::String(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            _ => Err(JsonError::invalid(path, format!("not a float: {s}"))),
        },
        _ => Err(JsonError::invalid(path, "expected a number")),
    }
}

fn guid_at(path: &str, payload: &Value) -> Result<[u8; 16], JsonError> {
    let s = payload
        .as_str()
        .ok_or_else(|| JsonError::invalid(path, "guid must be a hex string"))?;
    let hex: String = s.chars().filter(|c| *c != '-').collect();
    if hex.len() != 32 || !hex.is_ascii() {
        return Err(JsonError::invalid(path, "guid must have 32 hex digits"));
    }
    let mut out = [0u8; 16];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| JsonError::invalid(path, format!("bad hex in guid `{s}`")))?;
    }
    Ok(out)
}
