//! Core logic behind the `nbt-merge` binary.
//!
//! Reads the three input trees (binary NBT or typed JSON), merges them and
//! renders the result in the same format.

use std::fs;
use std::path::{Path, PathBuf};

use nbt::{json, CodecError, JsonError, NbtTree};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::MergeError;
use crate::merge::{MergeOptions, Merger};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("{}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: JsonError,
    },
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("encoding result: {0}")]
    Encode(#[from] CodecError),
    #[error("rendering result: {0}")]
    Render(#[from] serde_json::Error),
    #[error("merge failed: {0}")]
    Merge(#[from] MergeError),
}

// ── Formats ───────────────────────────────────────────────────────────────

/// On-disk representation of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Big-endian binary NBT.
    #[default]
    Binary,
    /// Typed JSON.
    Json,
}

/// Parses a tree from raw file contents.
pub fn parse_tree(data: &[u8], format: Format, path: &Path) -> Result<NbtTree, CliError> {
    match format {
        Format::Binary => NbtTree::from_bytes(data).map_err(|source| CliError::Codec {
            path: path.to_path_buf(),
            source,
        }),
        Format::Json => serde_json::from_slice::<serde_json::Value>(data)
            .map_err(JsonError::from)
            .and_then(|value| json::tree_from_json(&value))
            .map_err(|source| CliError::Json {
                path: path.to_path_buf(),
                source,
            }),
    }
}

pub fn load_tree(path: &Path, format: Format) -> Result<NbtTree, CliError> {
    let data = fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = parse_tree(&data, format, path)?;
    debug!(path = %path.display(), entries = tree.root.len(), "loaded tree");
    Ok(tree)
}

/// Serializes a tree. JSON output is pretty-printed and newline-terminated.
pub fn render_tree(tree: &NbtTree, format: Format) -> Result<Vec<u8>, CliError> {
    match format {
        Format::Binary => Ok(tree.to_bytes()?),
        Format::Json => {
            let mut text = serde_json::to_string_pretty(&json::tree_to_json(tree))?;
            text.push('\n');
            Ok(text.into_bytes())
        }
    }
}

/// Reads [`MergeOptions`] from a TOML file.
pub fn load_options(path: &Path) -> Result<MergeOptions, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

// ── nbt-merge ─────────────────────────────────────────────────────────────

/// Merged tree plus the rendered diffs, for `--show-diffs`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub tree: NbtTree,
    pub left_diff: String,
    pub right_diff: String,
    pub merged_diff: String,
}

/// Merges three parsed trees. The result keeps the ancestor's root name.
pub fn merge_trees(
    ancestor: &NbtTree,
    left: &NbtTree,
    right: &NbtTree,
    options: MergeOptions,
) -> Result<MergeReport, CliError> {
    if left.name != ancestor.name || right.name != ancestor.name {
        warn!(
            ancestor = %ancestor.name,
            left = %left.name,
            right = %right.name,
            "root names differ, keeping the ancestor's"
        );
    }
    let merger = Merger::new(options);
    let outcome = merger.merge_detailed(&ancestor.root, &left.root, &right.root)?;
    let context = ancestor.name.as_str();
    Ok(MergeReport {
        left_diff: outcome.left_diff.write(context),
        right_diff: outcome.right_diff.write(context),
        merged_diff: outcome.merged_diff.write(context),
        tree: NbtTree::named(ancestor.name.clone(), outcome.result),
    })
}

/// Loads, merges and reports on three files.
pub fn merge_files(
    ancestor: &Path,
    left: &Path,
    right: &Path,
    format: Format,
    options: MergeOptions,
) -> Result<MergeReport, CliError> {
    let ancestor = load_tree(ancestor, format)?;
    let left = load_tree(left, format)?;
    let right = load_tree(right, format)?;
    merge_trees(&ancestor, &left, &right, options)
}
