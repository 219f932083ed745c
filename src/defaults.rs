//! Default values for rhq configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable holding a path list of roots.
pub const ROOT_ENV: &str = "RHQ_ROOT";

/// Environment variable pointing at the configuration file.
pub const CONFIG_ENV: &str = "RHQ_CONFIG";

/// Git config key read for roots (may be set multiple times).
pub const GIT_CONFIG_ROOT_KEY: &str = "rhq.root";

/// Returns the default root directory, `~/rhq`.
///
/// Falls back to `rhq` in the current directory if the home directory cannot
/// be determined.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("rhq"))
        .unwrap_or_else(|| PathBuf::from("rhq"))
}

/// Returns the default configuration file location.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/rhq/config.toml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/rhq/config.toml`
/// - Windows: `{FOLDERID_RoamingAppData}\rhq\config.toml`
///
/// This can be overridden by the `--config` CLI flag or the `RHQ_CONFIG`
/// environment variable.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rhq").join("config.toml"))
}
