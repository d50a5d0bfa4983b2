// ABOUTME: The Client that fetches company profile pages and runs the extraction pipeline on them.
// ABOUTME: Provides scrape() for one URL, scrape_html() for saved pages and scrape_all() for bounded fan-out.

use std::sync::Arc;

use companyscope_extract::{CompanyParser, CompanyRecord};
use futures::stream::{self, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::ScrapeError;
use crate::options::{ClientBuilder, Options, DEFAULT_ACCEPT};
use crate::outcome::ScrapeOutcome;
use crate::resource::{fetch, FetchOptions};

/// Fetches company pages and extracts records from them.
///
/// Cloning is cheap; clones share the HTTP connection pool and the parser.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    parser: Arc<CompanyParser>,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ScrapeError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch(
                        "",
                        "Build",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        let parser = opts
            .parser
            .clone()
            .unwrap_or_else(|| Arc::new(CompanyParser::new()));

        Ok(Self {
            opts,
            http_client,
            parser,
        })
    }

    fn fetch_options(&self) -> FetchOptions {
        let mut headers = self.opts.headers.clone();
        headers
            .entry("Accept".to_string())
            .or_insert_with(|| DEFAULT_ACCEPT.to_string());
        FetchOptions {
            headers,
            max_retries: self.opts.max_retries,
            retry_backoff: self.opts.retry_backoff,
        }
    }

    /// Fetch `url` and extract its company record.
    pub async fn scrape(&self, url: &str) -> Result<CompanyRecord, ScrapeError> {
        let fetched = fetch(&self.http_client, url, &self.fetch_options()).await?;
        debug!(
            url,
            status = fetched.status,
            final_url = %fetched.final_url,
            "fetched page"
        );

        if !fetched.is_text() {
            return Err(ScrapeError::extract(
                url,
                "Scrape",
                Some(anyhow::anyhow!(
                    "non-text document ({})",
                    fetched.content_type.as_deref().unwrap_or_default()
                )),
            ));
        }

        let html = fetched.text_utf8(None);
        if html.contains('\0') {
            return Err(ScrapeError::extract(
                url,
                "Scrape",
                Some(anyhow::anyhow!("non-text document (contains NUL bytes)")),
            ));
        }

        Ok(self.scrape_html(&html, url))
    }

    /// Extract a record from HTML that has already been retrieved.
    pub fn scrape_html(&self, html: &str, url: &str) -> CompanyRecord {
        let record = self.parser.extract(html, url);
        info!(
            "Parsed company '{}' from {}",
            record.name.as_deref().unwrap_or_default(),
            url
        );
        record
    }

    /// Scrape every URL with at most `concurrency` requests in flight.
    ///
    /// Returns one outcome per input URL, in input order. Failures become
    /// placeholders carrying the error message.
    pub async fn scrape_all(&self, urls: &[String]) -> Vec<ScrapeOutcome> {
        let limit = self.opts.concurrency.max(1);

        stream::iter(urls.iter().cloned())
            .map(|url| {
                let client = self.clone();
                let task_url = url.clone();
                let handle = tokio::spawn(async move { client.scrape(&task_url).await });
                settle(url, handle)
            })
            .buffered(limit)
            .collect()
            .await
    }
}

/// Turn a finished scrape task into its outcome; a panicked or cancelled
/// task becomes a placeholder like any other failure.
async fn settle(
    url: String,
    handle: JoinHandle<Result<CompanyRecord, ScrapeError>>,
) -> ScrapeOutcome {
    match handle.await {
        Ok(Ok(record)) => record.into(),
        Ok(Err(e)) => {
            error!(url = %url, error = %e, "failed to scrape");
            ScrapeOutcome::failed(url, e.to_string())
        }
        Err(join) => {
            error!(url = %url, error = %join, "scrape task aborted");
            ScrapeOutcome::failed(url, format!("task failed: {}", join))
        }
    }
}
