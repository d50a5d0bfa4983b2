// ABOUTME: Heuristic extractor reading meta tags, links, selectors and visible text.
// ABOUTME: Fills the same field keys as the JSON-LD extractor; every rule is independent.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde_json::Value;
use tracing::{debug, Span};

use crate::fields::FieldMap;
use crate::normalize::parse_int_safe;
use crate::select::{all_texts, first_href_matching, first_text, meta_content, visible_text_nodes};

static ABSOLUTE_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s().-]{6,}").unwrap());
static EMPLOYEE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)employee").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[\d,]*").unwrap());

const INDUSTRY_SELECTOR: &str = "[data-qa='industry'], .industry, .industries";

/// Address selectors in priority order.
const ADDRESS_SELECTORS: &[&str] = &["[data-qa='address']", ".address", ".hq", ".headquarters"];

/// Best-effort field extraction that does not rely on structured data.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    span: Span,
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new(tracing::debug_span!("heuristic_extractor"))
    }
}

impl HeuristicExtractor {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Runs every rule; a rule without a match leaves its key absent.
    pub fn extract(&self, doc: &Html) -> FieldMap {
        let _entered = self.span.enter();
        let mut result = FieldMap::new();

        if let Some(title) = meta_content(doc, "meta[property='og:title']") {
            result.insert("name".into(), Value::String(title));
        }

        if let Some(desc) = meta_content(doc, "meta[name='description']") {
            result.insert("description".into(), Value::String(desc));
        }

        if let Some(href) = first_href_matching(doc, &ABSOLUTE_URL_RE) {
            result.insert("website".into(), Value::String(href));
        }

        let texts = visible_text_nodes(doc);

        if let Some(phone) = texts.iter().find(|t| PHONE_RE.is_match(t)) {
            result.insert("phone_number".into(), Value::String(phone.trim().to_string()));
        }

        let industries = all_texts(doc, INDUSTRY_SELECTOR);
        if !industries.is_empty() {
            result.insert(
                "industry".into(),
                Value::Array(industries.into_iter().map(Value::String).collect()),
            );
        }

        if let Some(hq) = first_text(doc, ADDRESS_SELECTORS) {
            result.insert("headquarters".into(), Value::String(hq));
        }

        // First number in the first employee-mentioning node that has one.
        let count = texts
            .iter()
            .filter(|t| EMPLOYEE_RE.is_match(t))
            .find_map(|t| NUMBER_RE.find(t));
        if let Some(m) = count {
            let parsed = parse_int_safe(&Value::String(m.as_str().to_string()));
            debug!(raw = m.as_str(), ?parsed, "employee count from page text");
            result.insert("employees".into(), parsed.map_or(Value::Null, Value::from));
        }

        result
    }
}
