//! Property-based tests for the remote-to-local path mapping.
//!
//! These tests use proptest to generate random host/owner/project triples and
//! verify that the mapping and the name matching hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::local::LocalRepository;
    use crate::path::{from_discovered_path, to_local_path};
    use crate::remote::{RemoteRepository, Resolver};
    use crate::vcs::VcsKind;
    use proptest::prelude::*;
    use std::path::Path;

    fn host() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,10}\\.(com|org|io)"
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,15}"
    }

    fn remote(host: &str, owner: &str, project: &str) -> RemoteRepository {
        Resolver::default()
            .resolve_with(
                &format!("https://{}/{}/{}", host, owner, project),
                Some(VcsKind::Git),
            )
            .unwrap()
    }

    fn local(host: &str, owner: &str, project: &str) -> LocalRepository {
        to_local_path(Path::new("/src"), &remote(host, owner, project))
    }

    // ============================================================================
    // to_local_path / from_discovered_path
    // ============================================================================

    proptest! {
        /// Property: the local path is always root/host/owner/project
        #[test]
        fn local_path_is_root_host_owner_project(
            host in host(),
            owner in segment(),
            project in segment(),
        ) {
            let repo = local(&host, &owner, &project);
            prop_assert_eq!(
                repo.full_path(),
                Path::new("/src").join(&host).join(&owner).join(&project)
            );
            prop_assert_eq!(repo.name(), format!("{}/{}/{}", host, owner, project));
        }

        /// Property: discovering the mapped path gives back the same repository
        #[test]
        fn discovered_path_round_trips(
            host in host(),
            owner in segment(),
            project in segment(),
        ) {
            let repo = local(&host, &owner, &project);
            let discovered = from_discovered_path(Path::new("/src"), repo.full_path());
            prop_assert_eq!(discovered, Some(repo));
        }

        /// Property: the clone URL maps to the same local path as the reference
        #[test]
        fn clone_url_resolves_to_same_path(
            host in host(),
            owner in segment(),
            project in segment(),
        ) {
            let first = remote(&host, &owner, &project);
            let second = Resolver::default()
                .resolve_with(first.clone_url().as_str(), Some(VcsKind::Git))
                .unwrap();
            prop_assert_eq!(first.path_parts(), second.path_parts());
        }
    }

    // ============================================================================
    // subpaths / matches
    // ============================================================================

    proptest! {
        /// Property: subpaths are suffixes of the name, shortest first
        #[test]
        fn subpaths_are_suffixes_shortest_first(
            host in host(),
            owner in segment(),
            project in segment(),
        ) {
            let repo = local(&host, &owner, &project);
            let subpaths = repo.subpaths();
            prop_assert_eq!(subpaths.first(), Some(&project));
            prop_assert_eq!(subpaths.get(1), Some(&format!("{}/{}", owner, project)));
            prop_assert_eq!(subpaths.last(), Some(&repo.name()));
            for path in &subpaths {
                prop_assert!(repo.name().ends_with(path.as_str()));
            }
        }

        /// Property: a repository always matches its full name
        #[test]
        fn repository_matches_its_full_name(
            host in host(),
            owner in segment(),
            project in segment(),
        ) {
            let repo = local(&host, &owner, &project);
            let owner_project = format!("{}/{}", owner, project);
            prop_assert!(repo.matches(&repo.name()));
            prop_assert!(repo.matches(&owner_project));
        }

        /// Property: matching never ignores the project segment
        #[test]
        fn other_project_never_matches(
            host in host(),
            owner in segment(),
            project in segment(),
            other in segment(),
        ) {
            prop_assume!(project != other && owner != other);
            let repo = local(&host, &owner, &project);
            prop_assert!(!repo.matches(&other));
        }
    }
}
