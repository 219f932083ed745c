//! # Look Command Implementation
//!
//! Finds a working copy by name and prints its full path, so that
//! `cd "$(rhq look foo)"` works from a shell.
//!
//! A name matches when it equals `host/owner/project` or when it is one of the
//! repository's own subpaths (`owner/project`, `project`). Not finding a
//! repository, or finding more than one, is reported on stderr but is not an
//! error.

use anyhow::Result;
use clap::Args;

use rhq::matcher::{self, LookOutcome, Query};
use rhq::output::status;

use crate::cli::Context;
use crate::commands::list::discover;

/// Find a local repository by name and print its path
#[derive(Args, Debug)]
pub struct LookArgs {
    /// Repository name: project, owner/project or host/owner/project
    pub name: String,
}

/// Execute the `look` command.
pub fn execute(args: LookArgs, context: &Context) -> Result<()> {
    let repos = discover(context, &Query::All);

    match matcher::look(repos, &args.name) {
        LookOutcome::NotFound => status(&context.output, "error", "No repository found"),
        LookOutcome::Found(repo) => println!("{}", repo.full_path().display()),
        LookOutcome::Ambiguous(candidates) => {
            status(
                &context.output,
                "error",
                "More than one repositories are found; Try more precise name",
            );
            for repo in candidates {
                eprintln!("       - {}", repo.name());
            }
        }
    }
    Ok(())
}
