//! # Completions Command Implementation
//!
//! Prints a completion script covering rhq's subcommands (`get`, `list`,
//! `look`, `import`, `root`) and the global `--root`, `--config`, `--color`
//! and `--log-level` flags. Values such as `--vcs` kinds and shell names are
//! completed from their enums. The script is generated from the `Cli`
//! definition by `clap_complete`, so it never drifts from the parser.
//!
//! Completions do not load the configuration file; a broken config never
//! stops a script from being generated.
//!
//! ## Example
//!
//! ```bash
//! # Generate and install bash completions
//! rhq completions bash > ~/.local/share/bash-completion/completions/rhq
//!
//! # Generate zsh completions
//! rhq completions zsh > ~/.zfunc/_rhq
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Shell types for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish Shell
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Writes the completion script for the requested shell to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let shell: Shell = args.shell.into();
    generate(shell, &mut cmd, "rhq", &mut io::stdout());
    Ok(())
}
