//! `nbt-merge` — three-way merge of NBT files.
//!
//! Usage:
//!   nbt-merge <ancestor> <left> <right> [-o out] [--format binary|json]
//!             [--show-diffs] [--config merge.toml]
//!
//! The merged tree is written to `--output`, or to stdout. Set `RUST_LOG`
//! for diagnostics on stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use nbt_merge::cli::{load_options, merge_files, render_tree, CliError, Format};
use nbt_merge::IdentityListMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nbt-merge", version, about = "Three-way merge of NBT files")]
struct Args {
    /// Common ancestor of both edited files.
    ancestor: PathBuf,
    /// First edited descendant.
    left: PathBuf,
    /// Second edited descendant. Wins when both sides replace the same entry.
    right: PathBuf,

    /// Write the merged tree here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format of the inputs and the output.
    #[arg(long, value_enum, default_value_t = Format::Binary)]
    format: Format,

    /// Print the left, right and merged diffs to stderr.
    #[arg(long)]
    show_diffs: bool,

    /// TOML file with merge options.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Identity list handling (`precise` or `legacy`); overrides the config.
    #[arg(long)]
    identity_lists: Option<IdentityListMode>,
}

fn run(args: Args) -> Result<(), CliError> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => Default::default(),
    };
    if let Some(mode) = args.identity_lists {
        options.identity_lists = mode;
    }

    let report = merge_files(
        &args.ancestor,
        &args.left,
        &args.right,
        args.format,
        options,
    )?;
    if args.show_diffs {
        eprintln!(
            "--- left\n{}--- right\n{}--- merged\n{}",
            report.left_diff, report.right_diff, report.merged_diff
        );
    }

    let bytes = render_tree(&report.tree, args.format)?;
    match &args.output {
        Some(path) => std::fs::write(path, &bytes).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?,
        None => io::stdout().write_all(&bytes).map_err(|source| CliError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?,
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
