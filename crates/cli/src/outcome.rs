// ABOUTME: Per-URL scrape outcomes: an extracted record or an error placeholder.
// ABOUTME: Placeholders keep the record shape and add a single `error` key.

use companyscope_extract::CompanyRecord;
use serde::{Deserialize, Serialize};

/// A record that could not be extracted, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedRecord {
    #[serde(flatten)]
    pub record: CompanyRecord,
    pub error: String,
}

impl FailedRecord {
    pub fn new(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            record: CompanyRecord::empty(url),
            error: error.into(),
        }
    }
}

/// Result of scraping one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeOutcome {
    // Failed first: its extra `error` key disambiguates on deserialize.
    Failed(FailedRecord),
    Company(CompanyRecord),
}

impl ScrapeOutcome {
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        ScrapeOutcome::Failed(FailedRecord::new(url, error))
    }

    pub fn url(&self) -> &str {
        match self {
            ScrapeOutcome::Company(rec) => &rec.url,
            ScrapeOutcome::Failed(failed) => &failed.record.url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeOutcome::Company(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ScrapeOutcome::Company(_) => None,
            ScrapeOutcome::Failed(failed) => Some(&failed.error),
        }
    }
}

impl From<CompanyRecord> for ScrapeOutcome {
    fn from(rec: CompanyRecord) -> Self {
        ScrapeOutcome::Company(rec)
    }
}
