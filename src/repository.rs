//! # Getting Repositories
//!
//! This module provides the `RepositoryManager`, which combines the resolver
//! output, the path mapper and the VCS driver into the single operation users
//! actually want: "make sure I have this repository locally".
//!
//! ## Design
//!
//! `get` is split into two steps so callers can report what is about to
//! happen before a potentially slow clone starts:
//!
//! - **`plan`** looks at the filesystem and decides between cloning, updating
//!   and doing nothing. It never mutates anything.
//! - **`execute`** carries out the plan through the [`VcsDriver`].
//!
//! An existing working copy is looked for under every configured root; new
//! clones always go to the primary root. With `update` off, `get` is
//! idempotent: a second call finds the working copy and leaves it alone.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::local::LocalRepository;
use crate::path::to_local_path;
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::remote::RemoteRepository;
use crate::vcs::VcsDriver;

/// What `get` will do for a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetAction {
    /// No working copy exists; clone into `local`.
    Clone {
        remote: RemoteRepository,
        local: LocalRepository,
    },
    /// A working copy exists and should be updated.
    Update { local: LocalRepository },
    /// A working copy exists; leave it alone.
    Skip { local: LocalRepository },
}

impl GetAction {
    pub fn local(&self) -> &LocalRepository {
        match self {
            GetAction::Clone { local, .. }
            | GetAction::Update { local }
            | GetAction::Skip { local } => local,
        }
    }
}

/// What `get` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetOutcome {
    Cloned,
    Updated,
    Exists,
}

/// Clones and updates repositories under the configured roots.
pub struct RepositoryManager {
    roots: Vec<PathBuf>,
    driver: VcsDriver,
}

impl RepositoryManager {
    /// Creates a manager that runs the real VCS tools.
    pub fn new(config: &Config) -> Self {
        Self::with_runner(config, Arc::new(SystemProcessRunner))
    }

    /// Creates a manager with a custom process runner.
    ///
    /// This is primarily used for testing to record invocations instead of
    /// running real tools.
    pub fn with_runner(config: &Config, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            roots: config.roots().to_vec(),
            driver: VcsDriver::new(runner),
        }
    }

    /// Decides whether `remote` needs a clone, an update, or nothing.
    ///
    /// Fails only when the filesystem cannot be inspected; a missing working
    /// copy is not an error.
    pub fn plan(&self, remote: &RemoteRepository, update: bool) -> Result<GetAction> {
        for root in &self.roots {
            let local = to_local_path(root, remote);
            if exists(local.full_path())? {
                debug!("found {} under {}", remote, root.display());
                return Ok(if update {
                    GetAction::Update { local }
                } else {
                    GetAction::Skip { local }
                });
            }
        }

        Ok(GetAction::Clone {
            remote: remote.clone(),
            local: to_local_path(&self.roots[0], remote),
        })
    }

    /// Carries out a plan from [`RepositoryManager::plan`].
    pub fn execute(&self, action: &GetAction) -> Result<GetOutcome> {
        match action {
            GetAction::Clone { remote, local } => {
                self.driver.clone_repository(
                    remote.vcs(),
                    remote.clone_url().as_str(),
                    local.full_path(),
                )?;
                Ok(GetOutcome::Cloned)
            }
            GetAction::Update { local } => {
                self.driver.update(local.full_path())?;
                Ok(GetOutcome::Updated)
            }
            GetAction::Skip { .. } => Ok(GetOutcome::Exists),
        }
    }

    /// Clones `remote` if absent; updates it if present and `update` is set.
    pub fn get(&self, remote: &RemoteRepository, update: bool) -> Result<GetOutcome> {
        let action = self.plan(remote, update)?;
        self.execute(&action)
    }
}

/// `Ok(false)` only for "does not exist"; every other failure is an error.
fn exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(Error::PathIo {
            path: path.to_path_buf(),
            source,
        }),
    }
}
