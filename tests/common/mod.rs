//! Shared test utilities for E2E tests.
//!
//! This module provides a fixture that lays out fake working copies under a
//! temporary root, plus helpers that run the `rhq` binary against it without
//! touching the user's configuration.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_repo("github.com/alice/foo");
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// A temporary directory holding a repository root and an optional
/// configuration file.
///
/// The root lives at `<temp>/root`; the configuration file at
/// `<temp>/config.toml` and is only created by [`TestFixture::with_config`].
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty root.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("root")
            .create_dir_all()
            .expect("Failed to create root");
        Self { temp_dir }
    }

    /// Add a git working copy at `root/<name>`.
    pub fn with_repo(self, name: &str) -> Self {
        self.with_marker(name, ".git")
    }

    /// Add a working copy of any kind by creating its marker directory.
    pub fn with_marker(self, name: &str, marker: &str) -> Self {
        self.temp_dir
            .child("root")
            .child(name)
            .child(marker)
            .create_dir_all()
            .expect("Failed to create working copy");
        self
    }

    /// Add a plain directory at `root/<name>`, not a working copy.
    #[allow(dead_code)]
    pub fn with_dir(self, name: &str) -> Self {
        self.temp_dir
            .child("root")
            .child(name)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Write the configuration file.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config.toml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Write a file relative to the temp directory (not the root).
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the repository root.
    pub fn root(&self) -> PathBuf {
        self.path().join("root")
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    /// A command isolated from the user's environment, with no root flag.
    ///
    /// `RHQ_CONFIG` points at this fixture's config file, which does not
    /// exist unless [`TestFixture::with_config`] was called.
    pub fn bare_command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("rhq");
        cmd.current_dir(self.path())
            .env("RHQ_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RHQ_ROOT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// A command rooted at this fixture's root.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = self.bare_command();
        cmd.arg("--root").arg(self.root());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_root() {
        let fixture = TestFixture::new();
        assert!(fixture.root().is_dir());
        assert!(!fixture.config_path().exists());
    }

    #[test]
    fn test_fixture_with_repo() {
        let fixture = TestFixture::new().with_repo("github.com/alice/foo");
        assert!(fixture.root().join("github.com/alice/foo/.git").is_dir());
    }

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config("roots = []");
        assert!(fixture.config_path().exists());
    }
}
