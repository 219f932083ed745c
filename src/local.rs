//! Local working copies and name matching.

use std::path::{Path, PathBuf};

/// A working copy under one of the configured roots.
///
/// `full_path` is always `root` joined with every element of `path_parts`;
/// build these with [`crate::path::to_local_path`] or
/// [`crate::path::from_discovered_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    root: PathBuf,
    path_parts: Vec<String>,
    full_path: PathBuf,
    rel_path: PathBuf,
}

impl LocalRepository {
    pub(crate) fn from_parts(root: &Path, path_parts: Vec<String>) -> Self {
        let rel_path: PathBuf = path_parts.iter().collect();
        Self {
            root: root.to_path_buf(),
            full_path: root.join(&rel_path),
            rel_path,
            path_parts,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `host`, `owner`, `project` and any deeper segments, in order.
    pub fn path_parts(&self) -> &[String] {
        &self.path_parts
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn rel_path(&self) -> &Path {
        &self.rel_path
    }

    /// `/`-joined path parts, independent of the platform separator.
    pub fn name(&self) -> String {
        self.path_parts.join("/")
    }

    /// The name without the host segment, e.g. `alice/foo`.
    pub fn non_host_path(&self) -> String {
        self.path_parts[1..].join("/")
    }

    /// Every trailing slice of the path parts, shortest first.
    ///
    /// `github.com/alice/foo` yields `foo`, `alice/foo`, `github.com/alice/foo`.
    pub fn subpaths(&self) -> Vec<String> {
        (0..self.path_parts.len())
            .rev()
            .map(|start| self.path_parts[start..].join("/"))
            .collect()
    }

    /// Exact-name match.
    ///
    /// True when `query` is one of this repository's own subpaths, the full
    /// name included. Subpaths differ in segment count, so each occurs once.
    /// Whether the name is also unique across other repositories is decided
    /// by the caller (see [`crate::matcher::look`]).
    pub fn matches(&self, query: &str) -> bool {
        self.subpaths().iter().any(|p| p == query)
    }
}
