// ABOUTME: Resource handling module for fetching company profile pages.
// ABOUTME: Handles HTTP fetching with retries, content-length limits, and charset decoding.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::ScrapeError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub max_retries: u32,
    pub retry_backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using charset hints from content-type header.
    pub fn text_utf8(&self, content_type_hint: Option<&str>) -> String {
        let ct = content_type_hint.or(self.content_type.as_deref());
        decode_body(&self.body, ct)
    }

    /// True unless the server declared a non-textual media type.
    pub fn is_text(&self) -> bool {
        match self.content_type.as_deref() {
            None => true,
            Some(ct) => {
                let mime = ct.split(';').next().unwrap_or_default().trim();
                mime.is_empty()
                    || mime.starts_with("text/")
                    || mime.contains("html")
                    || mime.contains("xml")
            }
        }
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Outcome of one request attempt that did not produce a page.
enum Failure {
    Retryable(ScrapeError),
    Fatal(ScrapeError),
}

/// Validate that `url` is an absolute http(s) URL.
pub fn validate_url(url: &str, op: &str) -> Result<url::Url, ScrapeError> {
    if url.is_empty() {
        return Err(ScrapeError::invalid_url(url, op, None));
    }
    let parsed = url::Url::parse(url)
        .map_err(|e| ScrapeError::invalid_url(url, op, Some(anyhow::anyhow!("invalid URL: {}", e))))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ScrapeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        )),
    }
}

/// Fetch a resource from the given URL, retrying transient failures.
///
/// Transport errors, timeouts, 429 and 5xx responses are retried up to
/// `opts.max_retries` times; attempt `n` sleeps `n * retry_backoff` first.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ScrapeError> {
    validate_url(url, "Fetch")?;

    let mut attempt: u32 = 0;
    loop {
        match fetch_once(client, url, opts).await {
            Ok(result) => return Ok(result),
            Err(Failure::Fatal(err)) => return Err(err),
            Err(Failure::Retryable(err)) => {
                if attempt >= opts.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = opts.retry_backoff * attempt;
                warn!(url, attempt, ?delay, error = %err, "retrying request");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Pages over `MAX_CONTENT_LENGTH` fail without retry, whether the size
/// comes from the header or the body actually read.
fn check_size(len: usize, url: &str) -> Result<(), Failure> {
    if len > MAX_CONTENT_LENGTH {
        return Err(Failure::Fatal(ScrapeError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        )));
    }
    Ok(())
}

async fn fetch_once(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, Failure> {
    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            Failure::Retryable(ScrapeError::timeout(
                url,
                "Fetch",
                Some(anyhow::anyhow!("request timed out: {}", e)),
            ))
        } else {
            Failure::Retryable(ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("request failed: {}", e)),
            ))
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let err = ScrapeError::status(url, "Fetch", status.as_u16());
        return Err(if status.as_u16() == 429 || status.is_server_error() {
            Failure::Retryable(err)
        } else {
            Failure::Fatal(err)
        });
    }

    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });
    if let Some(len) = content_length {
        check_size(usize::try_from(len).unwrap_or(usize::MAX), url)?;
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            Failure::Retryable(ScrapeError::timeout(
                url,
                "Fetch",
                Some(anyhow::anyhow!("timed out reading body: {}", e)),
            ))
        } else {
            Failure::Retryable(ScrapeError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("failed to read body: {}", e)),
            ))
        }
    })?;

    check_size(body.len(), url)?;
    debug!(url, bytes = body.len(), "read body");

    Ok(FetchResult {
        status: status.as_u16(),
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}
