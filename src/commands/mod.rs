//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `rhq`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`Context`](crate::cli::Context) and performs the command's logic.
//!
//! Status lines go to stderr; paths meant for scripts go to stdout.

pub mod completions;
pub mod get;
pub mod import;
pub mod list;
pub mod look;
pub mod root;
