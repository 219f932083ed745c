//! # Root Command Implementation
//!
//! Prints the primary root, where new clones go, or every configured root
//! with `--all`.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use crate::cli::Context;

/// Print the configured root directories
#[derive(Args, Debug)]
pub struct RootArgs {
    /// Print every root, primary first
    #[arg(long)]
    pub all: bool,
}

/// Execute the `root` command.
pub fn execute(args: RootArgs, context: &Context) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.all {
        for root in context.config.roots() {
            writeln!(out, "{}", root.display())?;
        }
    } else {
        writeln!(out, "{}", context.config.primary_root().display())?;
    }
    Ok(())
}
