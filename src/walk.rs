//! # Local Repository Discovery
//!
//! [`walk`] scans the configured roots depth-first and yields a
//! [`LocalRepository`] for every directory that directly contains a VCS
//! metadata directory. The walker never descends into a working copy it has
//! found, so vendored or nested checkouts inside a repository are not reported
//! separately.
//!
//! The scan is lazy and holds no cache: calling [`walk`] again rescans the
//! filesystem from scratch. Symbolic links below a root are not followed.

use std::path::PathBuf;

use log::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::local::LocalRepository;
use crate::path::from_discovered_path;
use crate::vcs::VcsKind;

/// Lazily walks `roots` in order, yielding discovered working copies.
///
/// Traversal errors (unreadable directories, ...) are yielded as `Err` items;
/// the walk continues past them.
pub fn walk<I, P>(roots: I) -> LocalRepositories
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    LocalRepositories {
        pending: roots.into_iter().map(Into::into).collect(),
        current: None,
    }
}

/// Iterator returned by [`walk`].
pub struct LocalRepositories {
    pending: std::collections::VecDeque<PathBuf>,
    current: Option<(PathBuf, walkdir::IntoIter)>,
}

impl LocalRepositories {
    fn next_root(&mut self) -> bool {
        while let Some(root) = self.pending.pop_front() {
            if !root.is_dir() {
                debug!("skipping missing root {}", root.display());
                continue;
            }
            let walker = WalkDir::new(&root)
                .min_depth(1)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter();
            self.current = Some((root, walker));
            return true;
        }
        false
    }
}

impl Iterator for LocalRepositories {
    type Item = Result<LocalRepository>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((root, walker)) = self.current.as_mut() else {
                if self.next_root() {
                    continue;
                }
                return None;
            };

            let entry = match walker.next() {
                Some(Ok(entry)) => entry,
                Some(Err(e)) => return Some(Err(e.into())),
                None => {
                    self.current = None;
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if VcsKind::detect(entry.path()).is_none() {
                continue;
            }

            walker.skip_current_dir();
            match from_discovered_path(root, entry.path()) {
                Some(repo) => return Some(Ok(repo)),
                None => debug!(
                    "ignoring working copy outside the host/owner/project layout: {}",
                    entry.path().display()
                ),
            }
        }
    }
}
