//! # Output Configuration
//!
//! This module controls how rhq prints status lines such as
//!
//! ```text
//!      clone https://github.com/alice/foo.git -> /home/me/rhq/github.com/alice/foo
//!     exists /home/me/rhq/github.com/bob/bar
//! ```
//!
//! Status lines go to stderr so that stdout stays machine-readable (`list`,
//! `look` and `root` print paths there).
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::{style, Term};

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stderr is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        Term::stderr().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

/// Formats a status line: the verb right-aligned in a 10-column gutter,
/// colored by kind when colors are enabled.
pub fn format_status(config: &OutputConfig, verb: &str, message: &str) -> String {
    let padded = format!("{:>10}", verb);
    if !config.use_color {
        return format!("{} {}", padded, message);
    }

    let styled = match verb {
        "error" => style(padded).red().bold(),
        "exists" | "skip" => style(padded).yellow().bold(),
        "page" | "summary" => style(padded).cyan().bold(),
        _ => style(padded).green().bold(),
    }
    .force_styling(true);
    format!("{} {}", styled, message)
}

/// Prints a status line to stderr.
pub fn status(config: &OutputConfig, verb: &str, message: &str) {
    eprintln!("{}", format_status(config, verb, message));
}
