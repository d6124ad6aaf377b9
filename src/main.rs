//! c2c: convert Cursor IDE rules into Claude markdown rules
//!
//! Run inside a project: every `.cursor` directory holding `.mdc` rules gets a
//! sibling `c2c-rules/` tree, an `_root.md` index and a `CLAUDE.md` reference.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "c2c")]
#[command(about = "Convert Cursor IDE rules to Claude AI markdown format", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory to scan (defaults to the current directory)
    #[arg(long, short)]
    root: Option<PathBuf>,

    /// Write all rules into a single c2c-rules tree at the scan root
    #[arg(long)]
    flat: bool,

    /// Print a JSON report instead of progress lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    commands::convert::execute(commands::convert::ConvertOptions {
        root: cli.root,
        flat: cli.flat,
        json: cli.json,
    })
}
