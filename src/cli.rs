//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use rhq::config::{Config, LoadOptions};
use rhq::defaults;
use rhq::output::OutputConfig;
use rhq::process::SystemProcessRunner;

use crate::commands;

/// rhq - Clone remote repositories into a host/owner/project tree and find them again
#[derive(Parser, Debug)]
#[command(name = "rhq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Root directory for working copies (repeatable; the first one receives new clones)
    ///
    /// Overrides RHQ_ROOT, the configuration file and `git config rhq.root`.
    #[arg(long = "root", global = true, value_name = "DIR")]
    roots: Vec<PathBuf>,

    /// Path to the configuration file
    #[arg(long, global = true, value_name = "FILE", env = defaults::CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone/sync with a remote repository
    Get(commands::get::GetArgs),

    /// List local repositories
    List(commands::list::ListArgs),

    /// Find a local repository by name and print its path
    Look(commands::look::LookArgs),

    /// Get every repository listed in a file or on stdin
    Import(commands::import::ImportArgs),

    /// Print the configured root directories
    Root(commands::root::RootArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Everything a command needs from the global flags.
pub struct Context {
    pub config: Config,
    pub output: OutputConfig,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let globals = Globals {
            roots: self.roots,
            config: self.config,
            color: self.color,
        };

        match self.command {
            Commands::Get(args) => commands::get::execute(args, &globals.context()?),
            Commands::List(args) => commands::list::execute(args, &globals.context()?),
            Commands::Look(args) => commands::look::execute(args, &globals.context()?),
            Commands::Import(args) => commands::import::execute(args, &globals.context()?),
            Commands::Root(args) => commands::root::execute(args, &globals.context()?),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

struct Globals {
    roots: Vec<PathBuf>,
    config: Option<PathBuf>,
    color: String,
}

impl Globals {
    /// Loads the configuration; only commands that touch repositories need it.
    fn context(self) -> Result<Context> {
        let options = LoadOptions::from_env(self.roots, self.config);
        Ok(Context {
            config: Config::load(&options, &SystemProcessRunner)
                .map_err(rhq::suggestions::for_error)?,
            output: OutputConfig::from_env_and_flag(&self.color),
        })
    }
}

/// `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
