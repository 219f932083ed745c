//! # Version Control Backends
//!
//! `rhq` never speaks a VCS protocol itself. It shells out to the installed
//! tool for each backend, which automatically picks up whatever the user has
//! configured for it:
//! - SSH keys from ~/.ssh/
//! - Credential helpers
//! - Per-host settings in ~/.gitconfig, ~/.hgrc or ~/.subversion
//!
//! The set of backends is the closed enum [`VcsKind`]. Everything that differs
//! between backends lives in one capability table ([`VcsKind::capabilities`]),
//! so adding a backend is a compile error until every field is filled in.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::process::{Invocation, ProcessOutput, ProcessRunner};

/// The version-control systems rhq knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    Git,
    #[serde(alias = "hg")]
    Mercurial,
    #[serde(alias = "svn")]
    Subversion,
}

/// Per-backend facts: which executable, which marker, which arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub program: &'static str,
    /// Metadata directory found directly inside a working copy.
    pub marker: &'static str,
    /// Subcommand that creates a working copy from a URL.
    pub clone_command: &'static str,
    /// Arguments that bring an existing working copy up to date.
    pub update_args: &'static [&'static str],
    /// Suffix appended to the project name in canonical clone URLs.
    pub url_suffix: &'static str,
}

const GIT: Capabilities = Capabilities {
    program: "git",
    marker: ".git",
    clone_command: "clone",
    update_args: &["pull", "--ff-only"],
    url_suffix: ".git",
};

const MERCURIAL: Capabilities = Capabilities {
    program: "hg",
    marker: ".hg",
    clone_command: "clone",
    update_args: &["pull", "--update"],
    url_suffix: "",
};

const SUBVERSION: Capabilities = Capabilities {
    program: "svn",
    marker: ".svn",
    clone_command: "checkout",
    update_args: &["update"],
    url_suffix: "",
};

impl VcsKind {
    /// All kinds, in detection priority order.
    pub const ALL: [VcsKind; 3] = [VcsKind::Git, VcsKind::Mercurial, VcsKind::Subversion];

    pub fn capabilities(self) -> &'static Capabilities {
        match self {
            VcsKind::Git => &GIT,
            VcsKind::Mercurial => &MERCURIAL,
            VcsKind::Subversion => &SUBVERSION,
        }
    }

    pub fn marker(self) -> &'static str {
        self.capabilities().marker
    }

    pub fn name(self) -> &'static str {
        match self {
            VcsKind::Git => "git",
            VcsKind::Mercurial => "mercurial",
            VcsKind::Subversion => "subversion",
        }
    }

    /// Detects the kind of working copy at `dir` by looking for metadata
    /// directories directly inside it, in priority order (git, mercurial,
    /// subversion).
    pub fn detect(dir: &Path) -> Option<VcsKind> {
        Self::ALL
            .into_iter()
            .find(|kind| dir.join(kind.marker()).is_dir())
    }

    /// Returns `true` if `dir` carries this kind's metadata directory.
    pub fn is_working_copy(self, dir: &Path) -> bool {
        dir.join(self.marker()).is_dir()
    }

    fn clone_invocation(self, url: &str, dest: &Path) -> Invocation {
        let caps = self.capabilities();
        Invocation::new(caps.program)
            .arg(caps.clone_command)
            .arg(url)
            .arg(dest)
    }

    fn update_invocation(self, path: &Path) -> Invocation {
        let caps = self.capabilities();
        Invocation::new(caps.program)
            .args(caps.update_args)
            .current_dir(path)
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VcsKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "git" => Ok(VcsKind::Git),
            "mercurial" | "hg" => Ok(VcsKind::Mercurial),
            "subversion" | "svn" => Ok(VcsKind::Subversion),
            other => Err(format!(
                "unknown VCS kind '{}' (expected git, mercurial or subversion)",
                other
            )),
        }
    }
}

/// Clones and updates working copies by invoking the backend's tool.
///
/// Both operations block until the tool exits and are attempted exactly once.
#[derive(Clone)]
pub struct VcsDriver {
    runner: Arc<dyn ProcessRunner>,
}

impl VcsDriver {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Clones `url` into `dest` with the tool for `kind`.
    ///
    /// Parent directories of `dest` are created first; the tool itself creates
    /// `dest`. An interrupted clone may leave a partial working copy behind.
    pub fn clone_repository(&self, kind: VcsKind, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::PathIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let output = self.run(&kind.clone_invocation(url, dest))?;
        if !output.success() {
            return Err(Error::CloneFailed {
                url: url.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr.trim_end().to_string(),
            });
        }
        Ok(())
    }

    /// Updates the working copy at `path`, detecting its kind from the
    /// metadata directory. Returns the kind that was updated.
    pub fn update(&self, path: &Path) -> Result<VcsKind> {
        let kind = VcsKind::detect(path).ok_or_else(|| Error::NotAWorkingCopy {
            path: path.to_path_buf(),
        })?;
        self.update_as(kind, path)?;
        Ok(kind)
    }

    /// Updates the working copy at `path` with the tool for `kind`.
    pub fn update_as(&self, kind: VcsKind, path: &Path) -> Result<()> {
        if !kind.is_working_copy(path) {
            return Err(Error::NotAWorkingCopy {
                path: path.to_path_buf(),
            });
        }

        let output = self.run(&kind.update_invocation(path))?;
        if !output.success() {
            return Err(Error::UpdateFailed {
                path: path.to_path_buf(),
                exit_code: output.exit_code,
                stderr: output.stderr.trim_end().to_string(),
            });
        }
        Ok(())
    }

    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        debug!("running: {}", invocation);
        self.runner
            .run(invocation)
            .map_err(|e| Error::ToolNotFound {
                program: invocation.program.clone(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fake::FakeRunner;
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn driver() -> (Arc<FakeRunner>, VcsDriver) {
        let runner = Arc::new(FakeRunner::new());
        (runner.clone(), VcsDriver::new(runner))
    }

    #[test]
    fn test_capability_table() {
        assert_eq!(VcsKind::Git.capabilities().program, "git");
        assert_eq!(VcsKind::Mercurial.marker(), ".hg");
        assert_eq!(VcsKind::Subversion.capabilities().clone_command, "checkout");
        assert_eq!(VcsKind::Git.capabilities().url_suffix, ".git");
        assert_eq!(VcsKind::Subversion.capabilities().url_suffix, "");
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("git".parse::<VcsKind>().unwrap(), VcsKind::Git);
        assert_eq!("hg".parse::<VcsKind>().unwrap(), VcsKind::Mercurial);
        assert_eq!("SVN".parse::<VcsKind>().unwrap(), VcsKind::Subversion);
        assert!("cvs".parse::<VcsKind>().is_err());
        assert_eq!(VcsKind::Mercurial.to_string(), "mercurial");
    }

    #[test]
    fn test_detect_priority_order() {
        let temp = TempDir::new().unwrap();
        assert_eq!(VcsKind::detect(temp.path()), None);

        fs::create_dir(temp.path().join(".svn")).unwrap();
        assert_eq!(VcsKind::detect(temp.path()), Some(VcsKind::Subversion));

        fs::create_dir(temp.path().join(".hg")).unwrap();
        assert_eq!(VcsKind::detect(temp.path()), Some(VcsKind::Mercurial));

        fs::create_dir(temp.path().join(".git")).unwrap();
        assert_eq!(VcsKind::detect(temp.path()), Some(VcsKind::Git));
    }

    #[test]
    fn test_detect_ignores_marker_files() {
        // A `.git` file (worktree pointer) is not a metadata directory.
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".git"), "gitdir: elsewhere").unwrap();
        assert_eq!(VcsKind::detect(temp.path()), None);
    }

    #[test]
    fn test_clone_creates_parents_and_invokes_tool() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("github.com/alice/foo");
        let (runner, driver) = driver();

        driver
            .clone_repository(VcsKind::Git, "https://github.com/alice/foo.git", &dest)
            .unwrap();

        assert!(dest.parent().unwrap().is_dir());
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "git");
        assert_eq!(
            calls[0].args,
            vec![
                OsString::from("clone"),
                OsString::from("https://github.com/alice/foo.git"),
                dest.clone().into_os_string(),
            ]
        );
    }

    #[test]
    fn test_subversion_uses_checkout() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("svn.example.org/team/tool");
        let (runner, driver) = driver();

        driver
            .clone_repository(VcsKind::Subversion, "https://svn.example.org/team/tool", &dest)
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].program, "svn");
        assert_eq!(calls[0].args[0], OsString::from("checkout"));
        assert!(dest.join(".svn").is_dir());
    }

    #[test]
    fn test_clone_failure_surfaces_stderr() {
        let temp = TempDir::new().unwrap();
        let (runner, driver) = driver();
        runner.push_failure(128, "fatal: repository not found\n");

        let err = driver
            .clone_repository(
                VcsKind::Git,
                "https://github.com/alice/missing.git",
                &temp.path().join("x/y/z"),
            )
            .unwrap_err();

        match err {
            Error::CloneFailed {
                exit_code, stderr, ..
            } => {
                assert_eq!(exit_code, Some(128));
                assert_eq!(stderr, "fatal: repository not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clone_missing_tool() {
        let temp = TempDir::new().unwrap();
        let (runner, driver) = driver();
        runner.push_spawn_error();

        let err = driver
            .clone_repository(VcsKind::Mercurial, "https://hg.example.org/a/b", &temp.path().join("a"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref program, .. } if program == "hg"));
    }

    #[test]
    fn test_update_runs_inside_working_copy() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".hg")).unwrap();
        let (runner, driver) = driver();

        let kind = driver.update(temp.path()).unwrap();

        assert_eq!(kind, VcsKind::Mercurial);
        let calls = runner.calls();
        assert_eq!(calls[0].program, "hg");
        assert_eq!(calls[0].to_string(), "hg pull --update");
        assert_eq!(calls[0].cwd.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_update_without_metadata() {
        let temp = TempDir::new().unwrap();
        let (runner, driver) = driver();

        let err = driver.update(temp.path()).unwrap_err();
        assert!(matches!(err, Error::NotAWorkingCopy { .. }));

        let err = driver.update_as(VcsKind::Git, temp.path()).unwrap_err();
        assert!(matches!(err, Error::NotAWorkingCopy { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_update_failure() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let (runner, driver) = driver();
        runner.push_failure(1, "fatal: Not possible to fast-forward, aborting.");

        let err = driver.update(temp.path()).unwrap_err();
        assert!(matches!(err, Error::UpdateFailed { exit_code: Some(1), .. }));
    }
}
