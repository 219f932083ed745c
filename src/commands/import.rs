//! # Import Command Implementation
//!
//! Runs `get` for every repository reference read from a file or stdin, one
//! per line. Blank lines and lines starting with `#` are ignored.
//!
//! ```bash
//! rhq import repos.txt
//! gh repo list alice --json url -q '.[].url' | rhq import
//! ```
//!
//! References are processed in pages. A reference that fails to resolve,
//! clone or update is reported and skipped; the rest of the batch still runs.
//! The command exits non-zero only when the input cannot be read or the
//! filesystem fails in a way that affects every reference.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use rhq::error::Error;
use rhq::import::{paginate, read_references, ImportReporter, ImportSummary, Importer};
use rhq::output::{format_status, OutputConfig};
use rhq::repository::{GetAction, RepositoryManager};
use rhq::suggestions;
use rhq::vcs::VcsKind;

use crate::cli::Context;

/// Get every repository listed in a file or on stdin
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File with one repository reference per line ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Update local repositories if cloned already
    #[arg(short, long)]
    pub update: bool,

    /// Force the VCS kind for every reference
    #[arg(long, value_name = "KIND")]
    pub vcs: Option<VcsKind>,

    /// Number of references processed per page
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub page_size: usize,
}

/// Execute the `import` command.
pub fn execute(args: ImportArgs, context: &Context) -> Result<()> {
    let references = match args.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_references(BufReader::new(file))
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        _ => read_references(io::stdin().lock()).context("Failed to read stdin")?,
    };

    let total = references.len();
    let pages = paginate(references, args.page_size);

    let resolver = context.config.resolver();
    let manager = RepositoryManager::new(&context.config);
    let importer = Importer::new(&resolver, &manager, args.update).with_vcs(args.vcs);

    let mut reporter = CliReporter::new(&context.output, total);
    let summary = importer
        .run(pages, &mut reporter)
        .map_err(suggestions::for_error)?;
    reporter.finish(&summary);
    Ok(())
}

/// Prints import progress as status lines, under a progress bar when stderr
/// is a terminal.
struct CliReporter<'a> {
    output: &'a OutputConfig,
    bar: Option<ProgressBar>,
}

impl<'a> CliReporter<'a> {
    fn new(output: &'a OutputConfig, total: usize) -> Self {
        let bar = Term::stderr().is_term().then(|| {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
                bar.set_style(style);
            }
            bar
        });
        Self { output, bar }
    }

    fn line(&self, verb: &str, message: &str) {
        let line = format_status(self.output, verb, message);
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{}", line),
        }
    }

    fn advance(&self, reference: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(reference.to_string());
            bar.inc(1);
        }
    }

    fn finish(&self, summary: &ImportSummary) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        self.line(
            "summary",
            &format!(
                "{} cloned, {} updated, {} existing, {} failed",
                summary.cloned, summary.updated, summary.exists, summary.failed
            ),
        );
    }
}

impl ImportReporter for CliReporter<'_> {
    fn page(&mut self, number: usize, total: usize) {
        self.line("page", &format!("{}/{}", number, total));
    }

    fn action(&mut self, reference: &str, action: &GetAction) {
        let path = action.local().full_path().display().to_string();
        match action {
            GetAction::Clone { remote, .. } => {
                self.line("clone", &format!("{} -> {}", remote, path))
            }
            GetAction::Update { .. } => self.line("update", &path),
            GetAction::Skip { .. } => self.line("exists", &path),
        }
        self.advance(reference);
    }

    fn failed(&mut self, reference: &str, error: &Error) {
        self.line("error", &format!("{}: {}", reference, error));
        self.advance(reference);
    }
}
