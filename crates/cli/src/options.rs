// ABOUTME: Configuration options for the scraping client and the ClientBuilder fluent API.
// ABOUTME: Options cover timeout, user agent, fan-out concurrency, retry policy and extra headers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use companyscope_extract::CompanyParser;

use crate::client::Client;
use crate::error::ScrapeError;

/// Accept header sent with every page request.
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Configuration options for the scraping client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub concurrency: usize,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
    pub parser: Option<Arc<CompanyParser>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: "CompanyScope/1.0".to_string(),
            concurrency: 5,
            max_retries: 2,
            retry_backoff: Duration::from_millis(500),
            http_client: None,
            headers: HashMap::new(),
            parser: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set how many URLs are fetched at once. Zero is treated as one.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.opts.concurrency = concurrency;
        self
    }

    /// Set how many times a retryable failure is retried.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.opts.max_retries = max_retries;
        self
    }

    /// Set the base delay between retries; attempt `n` waits `n * backoff`.
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.opts.retry_backoff = backoff;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Share an existing parser instead of creating one.
    pub fn parser(mut self, parser: Arc<CompanyParser>) -> Self {
        self.opts.parser = Some(parser);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, ScrapeError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
