// ABOUTME: Error type for the extraction core.
// ABOUTME: Only a document that is not text at all is an error; missing data never is.

use thiserror::Error;

/// Errors raised by the extraction entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The input bytes are not a text document.
    #[error("document for {url} is not text: {reason}")]
    NonText { url: String, reason: String },
}

impl ExtractError {
    pub fn non_text(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ExtractError::NonText {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
