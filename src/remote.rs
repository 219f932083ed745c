//! # Remote Repository Resolution
//!
//! Turns whatever the user typed (a URL, an `owner/project` shorthand, an
//! scp-like `git@host:owner/project` address) into a [`RemoteRepository`]:
//! the canonical `(host, owner, project, vcs, clone_url)` descriptor that the
//! rest of rhq works with.
//!
//! ## Accepted forms
//!
//! | Input | Interpreted as |
//! |---|---|
//! | `https://github.com/alice/foo` | itself |
//! | `alice/foo` | `https://github.com/alice/foo` |
//! | `gitlab.com/alice/foo` | `https://gitlab.com/alice/foo` |
//! | `git@github.com:alice/foo.git` | `ssh://git@github.com/alice/foo` |
//!
//! Only the first two path segments are significant. Anything after them
//! (`/tree/main`, `/issues/3`, ...) is web UI noise and is dropped.
//!
//! ## Host conventions
//!
//! The [`HostTable`] knows which VCS each well-known forge serves. Hosts that
//! serve more than one kind are refused rather than guessed: cloning with the
//! wrong tool leaves a broken working copy. Unknown hosts are assumed to be
//! plain git servers.

use std::collections::BTreeMap;
use std::fmt;

use url::{Host, Url};

use crate::error::{Error, Result};
use crate::vcs::VcsKind;

/// Host used for `owner/project` shorthands.
pub const DEFAULT_HOST: &str = "github.com";

const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "git", "ssh"];

/// A fully resolved remote repository.
///
/// Only [`Resolver::resolve`] builds these, so every field is populated and
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    host: String,
    owner: String,
    project: String,
    vcs: VcsKind,
    clone_url: Url,
}

impl RemoteRepository {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn vcs(&self) -> VcsKind {
        self.vcs
    }

    pub fn clone_url(&self) -> &Url {
        &self.clone_url
    }

    /// `host/owner/project`
    pub fn path_parts(&self) -> [&str; 3] {
        [&self.host, &self.owner, &self.project]
    }
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clone_url)
    }
}

/// How a host serves its repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRule {
    /// The host serves one VCS kind.
    Serves {
        kind: VcsKind,
        /// Plain `http` is upgraded to `https` for this host.
        https_only: bool,
    },
    /// The host serves several kinds; the URL alone cannot tell which.
    Ambiguous,
}

/// Lookup table from host name to [`HostRule`].
#[derive(Debug, Clone)]
pub struct HostTable {
    rules: BTreeMap<String, HostRule>,
}

impl Default for HostTable {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        let https_git = HostRule::Serves {
            kind: VcsKind::Git,
            https_only: true,
        };
        rules.insert("github.com".to_string(), https_git);
        rules.insert("gitlab.com".to_string(), https_git);
        rules.insert(
            "code.google.com".to_string(),
            HostRule::Serves {
                kind: VcsKind::Mercurial,
                https_only: true,
            },
        );
        rules.insert("bitbucket.org".to_string(), HostRule::Ambiguous);
        Self { rules }
    }
}

impl HostTable {
    /// The built-in table with per-host VCS overrides applied on top.
    pub fn with_overrides(overrides: &BTreeMap<String, VcsKind>) -> Self {
        let mut table = Self::default();
        for (host, kind) in overrides {
            let host = host.to_ascii_lowercase();
            let https_only = matches!(
                table.rules.get(&host),
                Some(HostRule::Serves { https_only: true, .. }) | Some(HostRule::Ambiguous)
            );
            table.rules.insert(
                host,
                HostRule::Serves {
                    kind: *kind,
                    https_only,
                },
            );
        }
        table
    }

    /// Rule for `host`; unknown hosts are generic git servers.
    pub fn rule(&self, host: &str) -> HostRule {
        self.rules
            .get(host)
            .copied()
            .unwrap_or(HostRule::Serves {
                kind: VcsKind::Git,
                https_only: false,
            })
    }
}

/// Classifies remote references into [`RemoteRepository`] descriptors.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    hosts: HostTable,
}

impl Resolver {
    pub fn new(hosts: HostTable) -> Self {
        Self { hosts }
    }

    /// Resolves `reference` using the host table to pick the VCS kind.
    pub fn resolve(&self, reference: &str) -> Result<RemoteRepository> {
        self.resolve_with(reference, None)
    }

    /// Resolves `reference`, forcing the VCS kind when `vcs` is given.
    pub fn resolve_with(&self, reference: &str, vcs: Option<VcsKind>) -> Result<RemoteRepository> {
        let url = parse_reference(reference)?;

        let scheme = url.scheme();
        if !ALLOWED_SCHEMES.contains(&scheme) {
            return Err(Error::invalid_reference(
                reference,
                format!("unsupported scheme '{}'", scheme),
            ));
        }

        let host = match url.host() {
            Some(Host::Domain(domain)) if is_dns_name(domain) => domain.to_ascii_lowercase(),
            Some(Host::Domain(domain)) => {
                return Err(Error::invalid_reference(
                    reference,
                    format!("'{}' is not a valid host name", domain),
                ))
            }
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => url
                .host_str()
                .map(str::to_ascii_lowercase)
                .unwrap_or_default(),
            None => return Err(Error::invalid_reference(reference, "missing host")),
        };

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        if segments.len() < 2 {
            return Err(Error::invalid_reference(
                reference,
                "expected at least <owner>/<project> after the host",
            ));
        }

        let owner = segments[0];
        let project = segments[1].strip_suffix(".git").unwrap_or(segments[1]);
        if project.is_empty() {
            return Err(Error::invalid_reference(reference, "empty project name"));
        }
        if [owner, project].iter().any(|s| *s == "." || *s == "..") {
            return Err(Error::invalid_reference(
                reference,
                "owner and project must be plain names",
            ));
        }

        let rule = self.hosts.rule(&host);
        let (kind, https_only) = match (vcs, rule) {
            (Some(kind), HostRule::Serves { https_only, .. }) => (kind, https_only),
            (Some(kind), HostRule::Ambiguous) => (kind, true),
            (None, HostRule::Serves { kind, https_only }) => (kind, https_only),
            (None, HostRule::Ambiguous) => {
                return Err(Error::UnknownVcsKind {
                    host,
                    hint: Some(
                        "Pass --vcs <git|mercurial|subversion>, or map the host in the [hosts] table of the config file"
                            .to_string(),
                    ),
                })
            }
        };

        let clone_url = canonical_clone_url(&url, &host, owner, project, kind, https_only)?;

        Ok(RemoteRepository {
            host,
            owner: owner.to_string(),
            project: project.to_string(),
            vcs: kind,
            clone_url,
        })
    }
}

/// Dot-separated labels of ASCII letters, digits, `-` and `_`.
///
/// Hosts of `git://` and `ssh://` URLs are opaque to the URL parser, so `.`,
/// `..` or percent-escapes would otherwise reach the local path.
fn is_dns_name(host: &str) -> bool {
    !host.is_empty()
        && host.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

/// Parses the three accepted syntaxes into an absolute URL.
fn parse_reference(reference: &str) -> Result<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_reference(reference, "empty reference"));
    }

    if let Some(ssh) = scp_like_to_ssh(trimmed) {
        return Url::parse(&ssh).map_err(|e| Error::invalid_reference(reference, e.to_string()));
    }

    match Url::parse(trimmed) {
        Ok(url) if url.has_host() => Ok(url),
        Ok(_) => Err(Error::invalid_reference(reference, "missing host")),
        Err(url::ParseError::RelativeUrlWithoutBase) => shorthand_to_url(reference, trimmed),
        Err(e) => Err(Error::invalid_reference(reference, e.to_string())),
    }
}

/// `git@github.com:alice/foo.git` -> `ssh://git@github.com/alice/foo.git`
fn scp_like_to_ssh(reference: &str) -> Option<String> {
    if reference.contains("://") {
        return None;
    }
    let (user_host, path) = reference.split_once(':')?;
    if !user_host.contains('@') || user_host.contains('/') || path.is_empty() {
        return None;
    }
    Some(format!("ssh://{}/{}", user_host, path.trim_start_matches('/')))
}

/// `alice/foo` or `gitlab.com/alice/foo` -> `https://<host>/alice/foo`
fn shorthand_to_url(reference: &str, shorthand: &str) -> Result<Url> {
    let segments: Vec<&str> = shorthand.split('/').filter(|s| !s.is_empty()).collect();
    if segments.iter().any(|s| s.chars().any(char::is_whitespace)) {
        return Err(Error::invalid_reference(
            reference,
            "path segments must not contain whitespace",
        ));
    }

    let (host, path) = match segments.as_slice() {
        [first, rest @ ..] if first.contains('.') && rest.len() >= 2 => (*first, rest.join("/")),
        _ => (DEFAULT_HOST, segments.join("/")),
    };

    Url::parse(&format!("https://{}/{}", host, path))
        .map_err(|e| Error::invalid_reference(reference, e.to_string()))
}

fn canonical_clone_url(
    source: &Url,
    host: &str,
    owner: &str,
    project: &str,
    kind: VcsKind,
    https_only: bool,
) -> Result<Url> {
    let scheme = match source.scheme() {
        "http" if https_only => "https",
        other => other,
    };

    let user = if scheme == "ssh" && !source.username().is_empty() {
        format!("{}@", source.username())
    } else {
        String::new()
    };
    let port = source.port().map(|p| format!(":{}", p)).unwrap_or_default();
    let suffix = kind.capabilities().url_suffix;

    Ok(Url::parse(&format!(
        "{scheme}://{user}{host}{port}/{owner}/{project}{suffix}"
    ))?)
}
