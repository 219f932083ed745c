//! # rhq
//!
//! This library manages local working copies of remote repositories. Given a
//! reference such as `https://github.com/alice/foo` or just `alice/foo`, it
//! works out which version-control system serves it, where it belongs on
//! disk, and clones or updates it there. It also finds existing working
//! copies again by full or partial name.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use rhq::path::{from_discovered_path, to_local_path};
//! use rhq::remote::Resolver;
//! use rhq::vcs::VcsKind;
//!
//! let remote = Resolver::default().resolve("alice/foo").unwrap();
//! assert_eq!(remote.host(), "github.com");
//! assert_eq!(remote.vcs(), VcsKind::Git);
//! assert_eq!(remote.clone_url().as_str(), "https://github.com/alice/foo.git");
//!
//! let local = to_local_path(Path::new("/src"), &remote);
//! assert_eq!(local.full_path(), Path::new("/src/github.com/alice/foo"));
//! assert!(local.matches("foo"));
//!
//! // The mapping is reversible.
//! assert_eq!(from_discovered_path(Path::new("/src"), local.full_path()), Some(local));
//! ```
//!
//! ## Core Concepts
//!
//! - **Resolution (`remote`)**: Classifies a reference into a
//!   `RemoteRepository` descriptor `(host, owner, project, vcs, clone_url)`.
//! - **Path mapping (`path`, `local`)**: Maps descriptors to
//!   `<root>/<host>/<owner>/<project>` and discovered directories back to
//!   `LocalRepository` records.
//! - **VCS backends (`vcs`, `process`)**: A closed set of backends (git,
//!   mercurial, subversion) driven through external tools behind a narrow
//!   process-runner abstraction.
//! - **Discovery (`walk`, `matcher`)**: Finds existing working copies under
//!   the roots and matches them by exact name, substring, or shortest unique
//!   subpath.
//! - **Getting (`repository`, `import`)**: Clone-or-update for one reference
//!   or for a whole feed of them.
//!
//! ## Execution Flow
//!
//! 1.  **Configuration**: Build a `Config` (roots, host overrides) once per run.
//! 2.  **Resolution**: Turn the user's reference into a descriptor.
//! 3.  **Mapping**: Compute the local path under the roots.
//! 4.  **Action**: Clone if absent, update if requested, otherwise leave it.

pub mod config;
pub mod defaults;
pub mod error;
pub mod import;
pub mod local;
pub mod matcher;
pub mod output;
pub mod path;
pub mod process;
pub mod remote;
pub mod repository;
pub mod suggestions;
pub mod vcs;
pub mod walk;

#[cfg(test)]
mod path_proptest;
