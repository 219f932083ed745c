//! # Configuration
//!
//! rhq is configured by an explicit [`Config`] value that is built once per
//! run and handed to the resolver, the walker and the repository manager.
//! Nothing is stored in process-wide state.
//!
//! ## Roots
//!
//! Roots are taken from the first source that provides any, in this order:
//!
//! 1. `--root` command-line flags
//! 2. the `RHQ_ROOT` environment variable (a platform path list)
//! 3. `roots` in the configuration file
//! 4. `git config --get-all rhq.root`
//! 5. `~/rhq`
//!
//! The first root is the primary root; new clones always land there.
//!
//! ## Configuration file
//!
//! ```toml
//! roots = ["~/src", "/work/mirrors"]
//!
//! [hosts]
//! "hg.example.org" = "mercurial"
//! "bitbucket.org" = "git"
//! ```
//!
//! A missing file is not an error. The `[hosts]` table overrides the built-in
//! host conventions used by the resolver.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::path::expand_home;
use crate::process::{Invocation, ProcessRunner};
use crate::remote::{HostTable, Resolver};
use crate::vcs::VcsKind;

/// On-disk configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub roots: Vec<PathBuf>,
    #[serde(default)]
    pub hosts: BTreeMap<String, VcsKind>,
}

/// Parses configuration file contents.
pub fn parse(content: &str) -> Result<ConfigFile> {
    toml::from_str(content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "Expected `roots = [..]` and an optional [hosts] table mapping host names to git, mercurial or subversion"
                .to_string(),
        ),
    })
}

/// Reads and parses a configuration file; `Ok(None)` if it does not exist.
pub fn from_file(path: &Path) -> Result<Option<ConfigFile>> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no configuration file at {}", path.display());
            Ok(None)
        }
        Err(source) => Err(Error::PathIo {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Inputs for [`Config::load`] that come from outside the process state.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Roots given on the command line.
    pub roots: Vec<PathBuf>,
    /// Explicit configuration file; the platform default is used otherwise.
    pub config_file: Option<PathBuf>,
    /// Value of `RHQ_ROOT`, if set.
    pub env_roots: Option<OsString>,
}

impl LoadOptions {
    /// Options with `env_roots` read from the environment.
    pub fn from_env(roots: Vec<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            roots,
            config_file,
            env_roots: std::env::var_os(defaults::ROOT_ENV),
        }
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    roots: Vec<PathBuf>,
    hosts: BTreeMap<String, VcsKind>,
}

impl Config {
    /// A configuration with explicit roots and no host overrides.
    ///
    /// Falls back to the default root when `roots` is empty.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        let roots = if roots.is_empty() {
            vec![defaults::default_root()]
        } else {
            roots
        };
        Self {
            roots,
            hosts: BTreeMap::new(),
        }
    }

    /// Builds the configuration from all layered sources.
    pub fn load(options: &LoadOptions, runner: &dyn ProcessRunner) -> Result<Self> {
        let file = match options
            .config_file
            .clone()
            .or_else(defaults::default_config_path)
        {
            Some(path) => from_file(&path)?.unwrap_or_default(),
            None => ConfigFile::default(),
        };

        let roots = if !options.roots.is_empty() {
            options.roots.clone()
        } else if let Some(env) = options.env_roots.as_ref().filter(|v| !v.is_empty()) {
            std::env::split_paths(env)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        } else if !file.roots.is_empty() {
            file.roots.clone()
        } else {
            git_config_roots(runner)
        };

        let mut config = Self::with_roots(roots.iter().map(|r| expand_home(r)).collect());
        config.hosts = file.hosts;
        Ok(config)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// The root new clones are placed under.
    pub fn primary_root(&self) -> &Path {
        &self.roots[0]
    }

    pub fn hosts(&self) -> &BTreeMap<String, VcsKind> {
        &self.hosts
    }

    /// A resolver using the built-in host table plus this config's overrides.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(HostTable::with_overrides(&self.hosts))
    }
}

/// Roots from `git config --path --get-all rhq.root`.
///
/// Git exits with status 1 when the key is unset; that, a missing `git`
/// binary, or any other failure yields no roots.
fn git_config_roots(runner: &dyn ProcessRunner) -> Vec<PathBuf> {
    let invocation = Invocation::new("git").args([
        "config",
        "--path",
        "--get-all",
        defaults::GIT_CONFIG_ROOT_KEY,
    ]);
    match runner.run(&invocation) {
        Ok(output) if output.success() => output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect(),
        Ok(output) => {
            debug!(
                "{} exited with {:?}; no roots from git config",
                invocation, output.exit_code
            );
            Vec::new()
        }
        Err(e) => {
            debug!("could not run {}: {}", invocation, e);
            Vec::new()
        }
    }
}
