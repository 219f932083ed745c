//! # Get Command Implementation
//!
//! This module implements the `get` subcommand, which makes sure a working
//! copy of a remote repository exists under the primary root.
//!
//! ## Functionality
//!
//! - **Resolution**: The reference is resolved to a host, owner, project and
//!   VCS kind. `alice/foo` is shorthand for `https://github.com/alice/foo`.
//! - **Clone**: If no working copy exists under any root, the repository is
//!   cloned to `<primary root>/<host>/<owner>/<project>`.
//! - **Update**: With `--update`, an existing working copy is pulled instead.
//!   Without it, an existing working copy is left untouched.
//!
//! Any failure (invalid reference, clone/update failure, filesystem error)
//! makes the command exit non-zero.

use anyhow::Result;
use clap::Args;

use rhq::output::status;
use rhq::repository::{GetAction, RepositoryManager};
use rhq::suggestions;
use rhq::vcs::VcsKind;

use crate::cli::Context;

/// Clone/sync with a remote repository
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Repository URL, <owner>/<project> or <host>/<owner>/<project>
    #[arg(value_name = "REPOSITORY")]
    pub reference: String,

    /// Update local repository if cloned already
    #[arg(short, long)]
    pub update: bool,

    /// Force the VCS kind (git, mercurial, subversion) instead of guessing from the host
    #[arg(long, value_name = "KIND")]
    pub vcs: Option<VcsKind>,
}

/// Execute the `get` command.
pub fn execute(args: GetArgs, context: &Context) -> Result<()> {
    let remote = context
        .config
        .resolver()
        .resolve_with(&args.reference, args.vcs)
        .map_err(suggestions::for_error)?;

    let manager = RepositoryManager::new(&context.config);
    let action = manager
        .plan(&remote, args.update)
        .map_err(suggestions::for_error)?;

    report(context, &action);
    manager.execute(&action).map_err(suggestions::for_error)?;
    Ok(())
}

/// Prints the status line for an action about to run.
fn report(context: &Context, action: &GetAction) {
    let path = action.local().full_path().display().to_string();
    match action {
        GetAction::Clone { remote, .. } => {
            status(&context.output, "clone", &format!("{} -> {}", remote, path))
        }
        GetAction::Update { .. } => status(&context.output, "update", &path),
        GetAction::Skip { .. } => status(&context.output, "exists", &path),
    }
}
