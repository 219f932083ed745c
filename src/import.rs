//! # Batch Import
//!
//! Gets every repository named by a feed of references, strictly one at a
//! time and in feed order. Feeds arrive in pages (the way starred-repository
//! or bookmark APIs deliver them); the page number and total are reported as
//! progress.
//!
//! A failure that concerns only one reference (unparseable, ambiguous host,
//! clone or update failure) is reported and the batch moves on. Filesystem
//! errors on the local path abort the whole batch.

use std::io::BufRead;

use log::info;

use crate::error::{Error, Result};
use crate::remote::Resolver;
use crate::repository::{GetAction, GetOutcome, RepositoryManager};
use crate::vcs::VcsKind;

/// One page of a reference feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub total: usize,
    pub references: Vec<String>,
}

/// Reads newline-separated references, skipping blank lines and `#` comments.
pub fn read_references<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut references = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        references.push(line.to_string());
    }
    Ok(references)
}

/// Splits `references` into pages of at most `page_size` items.
///
/// An empty feed yields no pages. A `page_size` of zero is treated as one.
pub fn paginate(references: Vec<String>, page_size: usize) -> Vec<Page> {
    let page_size = page_size.max(1);
    let total = references.len().div_ceil(page_size);
    references
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| Page {
            number: i + 1,
            total,
            references: chunk.to_vec(),
        })
        .collect()
}

/// Receives progress from [`Importer::run`].
pub trait ImportReporter {
    fn page(&mut self, number: usize, total: usize);
    /// Called before an action is executed.
    fn action(&mut self, reference: &str, action: &GetAction);
    fn failed(&mut self, reference: &str, error: &Error);
}

/// Counts of what a batch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub cloned: usize,
    pub updated: usize,
    pub exists: usize,
    pub failed: usize,
}

impl ImportSummary {
    fn record(&mut self, outcome: GetOutcome) {
        match outcome {
            GetOutcome::Cloned => self.cloned += 1,
            GetOutcome::Updated => self.updated += 1,
            GetOutcome::Exists => self.exists += 1,
        }
    }
}

/// Runs `get` over a feed of references.
pub struct Importer<'a> {
    resolver: &'a Resolver,
    manager: &'a RepositoryManager,
    update: bool,
    vcs: Option<VcsKind>,
}

impl<'a> Importer<'a> {
    pub fn new(resolver: &'a Resolver, manager: &'a RepositoryManager, update: bool) -> Self {
        Self {
            resolver,
            manager,
            update,
            vcs: None,
        }
    }

    /// Forces the VCS kind for every reference in the batch.
    pub fn with_vcs(mut self, vcs: Option<VcsKind>) -> Self {
        self.vcs = vcs;
        self
    }

    /// Processes every page in order.
    ///
    /// Returns the summary, or the first error that is not specific to a
    /// single reference.
    pub fn run<I>(&self, pages: I, reporter: &mut dyn ImportReporter) -> Result<ImportSummary>
    where
        I: IntoIterator<Item = Page>,
    {
        let mut summary = ImportSummary::default();

        for page in pages {
            info!("page {}/{}", page.number, page.total);
            reporter.page(page.number, page.total);

            for reference in &page.references {
                match self.get_one(reference, reporter) {
                    Ok(outcome) => summary.record(outcome),
                    Err(e) if e.is_per_item() => {
                        reporter.failed(reference, &e);
                        summary.failed += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(summary)
    }

    fn get_one(&self, reference: &str, reporter: &mut dyn ImportReporter) -> Result<GetOutcome> {
        let remote = self.resolver.resolve_with(reference, self.vcs)?;
        let action = self.manager.plan(&remote, self.update)?;
        reporter.action(reference, &action);
        self.manager.execute(&action)
    }
}
