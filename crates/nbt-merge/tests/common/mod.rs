#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use nbt::json::compound_from_json;
use nbt::TagCompound;
use serde::Deserialize;
use serde_json::{json, Value};

/// Builds a compound from typed-JSON entries, e.g.
/// `entries(json!({"k": {"int": 1}}))`.
pub fn entries(value: Value) -> TagCompound {
    let wrapped = json!({ "compound": value });
    compound_from_json(&wrapped).unwrap_or_else(|e| panic!("bad test compound {wrapped}: {e}"))
}

pub fn int(v: i32) -> Value {
    json!({ "int": v })
}

pub fn string(v: &str) -> Value {
    json!({ "string": v })
}

pub fn list(of: &str, items: Vec<Value>) -> Value {
    json!({ "list": { "of": of, "items": items } })
}

pub fn compound(value: Value) -> Value {
    json!({ "compound": value })
}

/// `{"id": id, "v": v}` as a compound element.
pub fn item(id: i32, v: i32) -> Value {
    compound(json!({ "id": int(id), "v": int(v) }))
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Expected {
    pub precise: Value,
    pub legacy: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeCase {
    pub name: String,
    pub ancestor: Value,
    pub left: Value,
    pub right: Value,
    pub expected: Expected,
}

#[derive(Debug, Clone, Deserialize)]
struct CaseFile {
    cases: Vec<MergeCase>,
}

pub fn load_cases(file: &str) -> Vec<MergeCase> {
    let path = fixtures_dir().join(file);
    let text =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {e}", path));
    let parsed: CaseFile = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {e}", path));
    parsed.cases
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nbt-merge-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("failed to create {:?}: {e}", dir));
    dir
}
