// ABOUTME: CompanyParser wiring both extractors, the merge and the record builder together.
// ABOUTME: extract(html, url) is a pure function from a page to a CompanyRecord.

use scraper::Html;
use tracing::{debug, Span};

use crate::builder::RecordBuilder;
use crate::error::ExtractError;
use crate::extractors::heuristic::HeuristicExtractor;
use crate::extractors::structured::StructuredExtractor;
use crate::fields::{merge, FieldMap};
use crate::record::CompanyRecord;

/// Extraction pipeline for company-profile pages.
///
/// Stateless apart from the span each component logs under; safe to share
/// across threads and call concurrently.
#[derive(Debug, Clone)]
pub struct CompanyParser {
    span: Span,
    structured: StructuredExtractor,
    heuristic: HeuristicExtractor,
    builder: RecordBuilder,
}

impl Default for CompanyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyParser {
    /// Create a parser logging under a `company_parser` span.
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("company_parser"))
    }

    /// Create a parser whose components log under children of `span`.
    pub fn with_span(span: Span) -> Self {
        let structured = StructuredExtractor::new(tracing::debug_span!(parent: &span, "structured"));
        let heuristic = HeuristicExtractor::new(tracing::debug_span!(parent: &span, "heuristic"));
        let builder = RecordBuilder::new(tracing::debug_span!(parent: &span, "builder"));
        Self {
            span,
            structured,
            heuristic,
            builder,
        }
    }

    /// Extract a record from an HTML page fetched from `url`.
    ///
    /// Never fails: anything that cannot be found is `None` or empty.
    pub fn extract(&self, html: &str, url: &str) -> CompanyRecord {
        let _entered = self.span.enter();
        debug!(url, bytes = html.len(), "parsing company page");

        let doc = Html::parse_document(html);
        let descriptor = self.structured.find_descriptor(&doc);
        let base = descriptor
            .as_ref()
            .map(|d| self.structured.map_descriptor(d))
            .unwrap_or_else(FieldMap::new);
        let fallback = self.heuristic.extract(&doc);
        debug!(
            structured = base.len(),
            heuristic = fallback.len(),
            "extracted field mappings"
        );

        let merged = merge(&base, &fallback);
        self.builder.build(&merged, url, descriptor.as_ref())
    }

    /// Extract from raw bytes, rejecting input that is not a text document.
    pub fn extract_bytes(&self, bytes: &[u8], url: &str) -> Result<CompanyRecord, ExtractError> {
        if bytes.contains(&0) {
            return Err(ExtractError::non_text(url, "contains NUL bytes"));
        }
        let html = std::str::from_utf8(bytes)
            .map_err(|e| ExtractError::non_text(url, format!("invalid UTF-8: {}", e)))?;
        Ok(self.extract(html, url))
    }
}

/// Extract a record with a default parser.
pub fn extract(html: &str, url: &str) -> CompanyRecord {
    CompanyParser::new().extract(html, url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_wins_and_heuristics_fill_gaps() {
        let html = r#"<html><head>
            <meta property="og:title" content="Heuristic Name">
            <meta name="description" content="From meta">
            <script type="application/ld+json">
              {"@type": "Organization", "name": "Structured Name", "description": null}
            </script>
        </head><body></body></html>"#;
        let rec = CompanyParser::new().extract(html, "https://example.com/company/1");
        assert_eq!(rec.name.as_deref(), Some("Structured Name"));
        assert_eq!(rec.description.as_deref(), Some("From meta"));
    }

    #[test]
    fn extract_bytes_rejects_binary() {
        let parser = CompanyParser::new();
        let err = parser
            .extract_bytes(&[0x89, b'P', b'N', b'G', 0, 0], "https://e.test/x")
            .unwrap_err();
        assert!(matches!(err, ExtractError::NonText { .. }));
        assert!(parser.extract_bytes(&[0xff, 0xfe, b'a'], "u").is_err());
    }

    #[test]
    fn extract_bytes_accepts_utf8() {
        let rec = CompanyParser::new()
            .extract_bytes("<meta property='og:title' content='Café'>".as_bytes(), "u")
            .unwrap();
        assert_eq!(rec.name.as_deref(), Some("Café"));
    }

    #[test]
    fn parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompanyParser>();
    }
}
