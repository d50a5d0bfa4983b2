// ABOUTME: Library entry point for the companyscope scraper application.
// ABOUTME: Re-exports the client, settings, exporter, run loop and error types.

//! CompanyScope - fetches company profile pages and exports structured records.
//!
//! # Example
//!
//! ```no_run
//! use companyscope::{Client, ScrapeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder().concurrency(2).build()?;
//!     let record = client.scrape("https://example.com/company/123456").await?;
//!     println!("{:?}", record.name);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod logging;
pub mod options;
pub mod outcome;
pub mod resource;
pub mod runner;

pub use companyscope_extract::{CompanyParser, CompanyRecord};

pub use crate::client::Client;
pub use crate::config::{Format, Settings};
pub use crate::error::{ConfigError, ErrorCode, ExportError, RunError, ScrapeError};
pub use crate::export::Exporter;
pub use crate::input::read_urls_from_file;
pub use crate::logging::init_logging;
pub use crate::options::{ClientBuilder, Options};
pub use crate::outcome::{FailedRecord, ScrapeOutcome};
pub use crate::runner::{run, RunSummary};
