//! # List Command Implementation
//!
//! This module implements the `list` subcommand, which prints the working
//! copies found under the configured roots.
//!
//! ## Functionality
//!
//! - **Filtering**: With a query, only repositories whose host-less path
//!   contains it are listed; `--exact` switches to exact name matching.
//! - **Output forms**: `host/owner/project` by default, the full path with
//!   `--full-path`, or the shortest unique subpath with `--unique`.
//!
//! This command is read-only. Directories that cannot be read are reported as
//! warnings and skipped.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use log::warn;

use rhq::local::LocalRepository;
use rhq::matcher::{unique_subpaths, Query};
use rhq::walk::walk;

use crate::cli::Context;

/// List local repositories
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list repositories matching this text
    pub query: Option<String>,

    /// Perform an exact match
    #[arg(short, long)]
    pub exact: bool,

    /// Print full paths
    #[arg(short = 'p', long, conflicts_with = "unique")]
    pub full_path: bool,

    /// Print unique subpaths
    #[arg(long)]
    pub unique: bool,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, context: &Context) -> Result<()> {
    let query = Query::new(args.query.as_deref(), args.exact);
    let repos = discover(context, &query);
    let stdout = io::stdout();
    render(&args, &repos, &mut stdout.lock())
}

/// Walks every root and keeps the repositories matching `query`.
pub fn discover(context: &Context, query: &Query) -> Vec<LocalRepository> {
    walk(context.config.roots())
        .filter_map(|result| match result {
            Ok(repo) => Some(repo),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .filter(|repo| query.is_match(repo))
        .collect()
}

fn render<W: Write>(args: &ListArgs, repos: &[LocalRepository], out: &mut W) -> Result<()> {
    if args.unique {
        for path in unique_subpaths(repos) {
            writeln!(out, "{}", path)?;
        }
        return Ok(());
    }

    for repo in repos {
        if args.full_path {
            writeln!(out, "{}", repo.full_path().display())?;
        } else {
            writeln!(out, "{}", repo.name())?;
        }
    }
    Ok(())
}
