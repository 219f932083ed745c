//! Mapping between remote repositories and local working-copy paths.
//!
//! Every repository lives at `<root>/<host>/<owner>/<project>`. The two
//! functions here are inverses of each other: [`to_local_path`] is used before
//! cloning, [`from_discovered_path`] when the walker finds an existing working
//! copy, and both must produce identical [`LocalRepository`] values for the
//! same repository.

use std::path::{Component, Path, PathBuf};

use crate::local::LocalRepository;
use crate::remote::RemoteRepository;

/// Minimum number of path segments below a root (`host/owner/project`).
pub const MIN_PATH_PARTS: usize = 3;

/// Maps `remote` to its location under `root`.
pub fn to_local_path(root: &Path, remote: &RemoteRepository) -> LocalRepository {
    let parts = remote.path_parts().map(str::to_string).to_vec();
    LocalRepository::from_parts(root, parts)
}

/// Recovers the repository record for a directory found under `root`.
///
/// Returns `None` when `path` is not below `root`, has fewer than
/// [`MIN_PATH_PARTS`] segments below it, or contains segments that are not
/// plain UTF-8 names.
pub fn from_discovered_path(root: &Path, path: &Path) -> Option<LocalRepository> {
    let rel = path.strip_prefix(root).ok()?;

    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_str()?.to_string()),
            Component::CurDir => continue,
            _ => return None,
        }
    }

    if parts.len() < MIN_PATH_PARTS {
        return None;
    }
    Some(LocalRepository::from_parts(root, parts))
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
