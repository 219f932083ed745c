//! # Error Suggestions
//!
//! This module turns library errors into user-facing errors with hints.
//! Following CLI recommendations, errors should tell users what went wrong
//! AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rhq::suggestions;
//!
//! let remote = resolver
//!     .resolve(&args.reference)
//!     .map_err(suggestions::for_error)?;
//! ```

use crate::error::Error;

/// Wraps `error` with hints appropriate to its kind.
pub fn for_error(error: Error) -> anyhow::Error {
    let hints: Vec<String> = match &error {
        Error::InvalidReference { .. } => vec![
            "Use a URL like https://github.com/<owner>/<project>".to_string(),
            "Or a GitHub shorthand like <owner>/<project>".to_string(),
            "Or an scp-like address like git@<host>:<owner>/<project>.git".to_string(),
        ],
        Error::ToolNotFound { program, .. } => {
            vec![format!("Install {program} and make sure it is on your PATH")]
        }
        Error::CloneFailed { .. } => vec![
            "Check that the repository exists and that you have access to it".to_string(),
            "For private repositories, configure SSH keys or a credential helper".to_string(),
        ],
        Error::NotAWorkingCopy { path } => vec![format!(
            "Remove or rename {} and run the command again to clone it",
            path.display()
        )],
        _ => Vec::new(),
    };

    if hints.is_empty() {
        return anyhow::Error::new(error);
    }

    let hints: Vec<String> = hints.iter().map(|h| format!("hint: {h}")).collect();
    anyhow::anyhow!("{error}\n\n{}", hints.join("\n"))
}
