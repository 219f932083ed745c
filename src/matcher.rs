//! # Repository Matching
//!
//! Query logic shared by `list` and `look`:
//!
//! - [`Query`] selects repositories: everything, an exact name, or a substring
//!   of the path without its host.
//! - [`unique_subpaths`] picks, for every repository in a set, the shortest
//!   subpath that no other repository in the set shares.
//! - [`look`] resolves a name to exactly one repository, or reports that it
//!   matched none or several.

use std::collections::HashMap;

use crate::local::LocalRepository;

/// How `list` filters discovered repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Match every repository.
    All,
    /// [`LocalRepository::matches`] semantics.
    Exact(String),
    /// Substring of the host-less path (`alice/foo`).
    Substring(String),
}

impl Query {
    /// Builds the query used by `list`: no text means everything, otherwise
    /// substring matching unless `exact` is set.
    pub fn new(text: Option<&str>, exact: bool) -> Self {
        match text {
            None | Some("") => Query::All,
            Some(text) if exact => Query::Exact(text.to_string()),
            Some(text) => Query::Substring(text.to_string()),
        }
    }

    pub fn is_match(&self, repo: &LocalRepository) -> bool {
        match self {
            Query::All => true,
            Query::Exact(name) => repo.matches(name),
            Query::Substring(text) => repo.non_host_path().contains(text.as_str()),
        }
    }
}

/// For each repository, its shortest subpath that occurs exactly once among
/// all subpaths of all `repos`, in input order.
///
/// Repositories without such a subpath (e.g. the same `host/owner/project`
/// present under two roots) contribute nothing.
pub fn unique_subpaths(repos: &[LocalRepository]) -> Vec<String> {
    let subpaths: Vec<Vec<String>> = repos.iter().map(LocalRepository::subpaths).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for path in subpaths.iter().flatten() {
        *counts.entry(path.as_str()).or_default() += 1;
    }

    subpaths
        .iter()
        .filter_map(|paths| {
            paths
                .iter()
                .find(|p| counts.get(p.as_str()) == Some(&1))
                .cloned()
        })
        .collect()
}

/// Result of looking a repository up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookOutcome {
    NotFound,
    Found(LocalRepository),
    /// Every repository the name matched, in discovery order.
    Ambiguous(Vec<LocalRepository>),
}

/// Finds the repositories whose name matches `name` exactly.
///
/// A short name like `foo` matches every `*/foo`; when more than one
/// repository matches the outcome is [`LookOutcome::Ambiguous`].
pub fn look<I>(repos: I, name: &str) -> LookOutcome
where
    I: IntoIterator<Item = LocalRepository>,
{
    let mut found: Vec<LocalRepository> = repos.into_iter().filter(|r| r.matches(name)).collect();
    match found.len() {
        0 => LookOutcome::NotFound,
        1 => LookOutcome::Found(found.remove(0)),
        _ => LookOutcome::Ambiguous(found),
    }
}
