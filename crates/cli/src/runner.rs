// ABOUTME: Top-level run loop: read URLs, scrape them all, log failures and export every outcome.
// ABOUTME: Returns a RunSummary so the binary can pick its exit code.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::RunError;
use crate::export::Exporter;
use crate::input::read_urls_from_file;

/// Counts and files produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<PathBuf>,
}

impl RunSummary {
    /// A run counts as successful when at least one record was extracted.
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }
}

/// Scrape every URL listed in `input` and export the results.
pub async fn run(settings: &Settings, input: &Path) -> Result<RunSummary, RunError> {
    let urls = read_urls_from_file(input);
    if urls.is_empty() {
        return Err(RunError::NoUrls {
            input: input.to_path_buf(),
        });
    }

    let client = settings.client_builder().build().map_err(RunError::Client)?;
    info!(
        "Scraping {} URLs with concurrency {}",
        urls.len(),
        settings.request.concurrency.max(1)
    );
    let outcomes = client.scrape_all(&urls).await;

    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - succeeded;
    if failed > 0 {
        warn!("{} of {} URLs failed", failed, outcomes.len());
    }

    let formats = settings.output.formats();
    if formats.is_empty() {
        warn!("no output formats configured, nothing exported");
    }
    let exporter = Exporter::new(
        settings.output.directory.clone(),
        formats,
        settings.output.filename_prefix.clone(),
    );
    let files = exporter.export(&outcomes)?;
    for file in &files {
        info!("Wrote {}", file.display());
    }

    info!(
        "Scraped {} companies ({} failed) from {} URLs",
        succeeded,
        failed,
        outcomes.len()
    );
    Ok(RunSummary {
        total: outcomes.len(),
        succeeded,
        failed,
        files,
    })
}
