//! # Error Handling
//!
//! This module defines the centralized error type for the `rhq` library. It
//! uses `thiserror` to build an `Error` enum covering every failure mode of
//! reference resolution, path mapping, repository discovery and the VCS
//! subprocess layer.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries the context needed to
//!   produce a useful message (the offending reference, the path, the captured
//!   standard error of a failed tool invocation, ...).
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! ## Fatal vs. per-item errors
//!
//! Callers processing a batch of references use [`Error::is_per_item`] to
//! decide whether to report a failure and continue with the next item. I/O
//! errors on the local path are fatal for the whole run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for rhq operations
#[derive(Error, Debug)]
pub enum Error {
    /// The remote reference could not be parsed or is structurally incomplete.
    #[error("Not a valid repository reference: {reference} ({reason})")]
    InvalidReference { reference: String, reason: String },

    /// The host is known to serve more than one kind of VCS and nothing
    /// configured says which one to use.
    #[error("Cannot determine the VCS kind for host {host}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UnknownVcsKind {
        host: String,
        /// Optional hint for how to resolve the ambiguity
        hint: Option<String>,
    },

    /// The external VCS tool exited non-zero while cloning.
    #[error("Clone of {url} failed{}: {stderr}", exit_code.map(|c| format!(" (exit code {})", c)).unwrap_or_default())]
    CloneFailed {
        url: String,
        /// `None` when the process was terminated by a signal
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The external VCS tool exited non-zero while updating.
    #[error("Update of {} failed{}: {stderr}", path.display(), exit_code.map(|c| format!(" (exit code {})", c)).unwrap_or_default())]
    UpdateFailed {
        path: PathBuf,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// An update was requested for a directory without VCS metadata.
    #[error("Not a working copy: {}", path.display())]
    NotAWorkingCopy { path: PathBuf },

    /// The VCS executable could not be spawned.
    #[error("Could not run {program}: {message}")]
    ToolNotFound { program: String, message: String },

    /// The configuration file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        hint: Option<String>,
    },

    /// A filesystem error tied to a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory traversal error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Builds an `InvalidReference` error.
    pub fn invalid_reference(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that mean the reference itself is unusable.
    ///
    /// An unknown VCS kind is reported the same way as an unparseable
    /// reference.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            Error::InvalidReference { .. } | Error::UnknownVcsKind { .. }
        )
    }

    /// Returns `true` when the error only affects the current item of a batch.
    pub fn is_per_item(&self) -> bool {
        self.is_invalid_reference()
            || matches!(
                self,
                Error::CloneFailed { .. }
                    | Error::UpdateFailed { .. }
                    | Error::NotAWorkingCopy { .. }
                    | Error::ToolNotFound { .. }
            )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
