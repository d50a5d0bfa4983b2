// ABOUTME: Shapes a merged field mapping into a typed CompanyRecord.
// ABOUTME: Applies per-field coercion and derives the company id from the URL or JSON-LD @id.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, Span};
use url::Url;

use crate::fields::FieldMap;
use crate::normalize::{clean_value, is_truthy, normalize_list, parse_float_safe, parse_int_safe};
use crate::record::{CompanyRecord, LeadershipProfile, NewsItem, TechStackItem};

static TRAILING_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

static NULL: Value = Value::Null;

/// Builds records from merged field mappings.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    span: Span,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(tracing::debug_span!("record_builder"))
    }
}

impl RecordBuilder {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Builds the record for `url`.
    ///
    /// `descriptor` is the raw JSON-LD payload and is consulted only for the id.
    pub fn build(
        &self,
        merged: &FieldMap,
        url: &str,
        descriptor: Option<&Map<String, Value>>,
    ) -> CompanyRecord {
        let _entered = self.span.enter();
        let text = |key: &str| clean_value(lookup(merged, key));
        let int = |key: &str| parse_int_safe(lookup(merged, key));
        let float = |key: &str| parse_float_safe(lookup(merged, key));
        let strings = |key: &str| string_list(lookup(merged, key));

        let employees = int("employees");
        let total_employees = if merged.contains_key("total_employees") {
            int("total_employees")
        } else {
            employees
        };

        let enps = [lookup(merged, "enps_score"), lookup(merged, "enps score")]
            .into_iter()
            .find(|v| !v.is_null())
            .unwrap_or(&NULL);

        CompanyRecord {
            url: url.to_string(),
            id: derive_company_id(url, descriptor),
            name: text("name"),
            description: text("description"),
            revenue: float("revenue"),
            revenue_currency: text("revenue_currency"),
            stock_symbol: text("stock_symbol"),
            website: text("website"),
            employees,
            industry: strings("industry"),
            headquarters: text("headquarters"),
            phone_number: text("phone_number"),
            total_funding_amount: float("total_funding_amount"),
            most_recent_funding_amount: float("most_recent_funding_amount"),
            funding_currency: text("funding_currency"),
            funding_rounds: int("funding_rounds"),
            leadership: objects(lookup(merged, "leadership"), |item| LeadershipProfile {
                name: sub_text(item, "name"),
                title: sub_text(item, "title"),
                url: sub_text(item, "url"),
            }),
            popular_searches: strings("popular_searches"),
            business_classification_codes: strings("business_classification_codes"),
            total_employees,
            c_level_employees: int("c_level_employees"),
            vp_level_employees: int("vp_level_employees"),
            director_level_employees: int("director_level_employees"),
            manager_level_employees: int("manager_level_employees"),
            non_manager_employees: int("non_manager_employees"),
            top_contacts: int("top_contacts"),
            org_chart: mapping_list(lookup(merged, "org_chart")),
            social_media: strings("social_media"),
            ceo_rating: float("ceo_rating"),
            enps_score: parse_float_safe(enps),
            similar_companies: strings("similar_companies"),
            email_formats: strings("email_formats"),
            products_owned: strings("products_owned"),
            tech_stack: objects(lookup(merged, "tech_stack"), |item| TechStackItem {
                company_name: sub_text(item, "company_name"),
                tech_name: sub_text(item, "tech_name"),
            }),
            recent_scoops: mapping_list(lookup(merged, "recent_scoops")),
            news_and_media: objects(lookup(merged, "news_and_media"), |item| NewsItem {
                title: sub_text(item, "title"),
                url: sub_text(item, "url"),
            }),
        }
    }
}

/// Derives the company id from JSON-LD `@id`, else from the URL's last path segment.
///
/// Only the trailing digit run is kept; heuristic page content is never consulted.
pub fn derive_company_id(url: &str, descriptor: Option<&Map<String, Value>>) -> Option<String> {
    if let Some(id) = descriptor.and_then(|d| d.get("@id")).and_then(clean_value) {
        if let Some(digits) = trailing_digits(&id) {
            return Some(digits);
        }
    }

    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(|c| c == '?' || c == '#').next().unwrap_or_default().to_string(),
    };
    let tail = path.split('/').filter(|s| !s.is_empty()).last()?;
    let digits = trailing_digits(tail);
    if digits.is_none() {
        debug!(url, "no company id in url");
    }
    digits
}

fn lookup<'a>(merged: &'a FieldMap, key: &str) -> &'a Value {
    merged.get(key).unwrap_or(&NULL)
}

fn trailing_digits(s: &str) -> Option<String> {
    TRAILING_DIGITS_RE
        .captures(s)
        .map(|caps| caps[1].to_string())
}

/// List of non-empty strings; falsy elements and non-scalars are dropped.
fn string_list(value: &Value) -> Vec<String> {
    normalize_list(value)
        .iter()
        .filter(|v| is_truthy(v))
        .filter_map(clean_value)
        .collect()
}

/// Object elements of a list, passed through unshaped.
fn mapping_list(value: &Value) -> Vec<Map<String, Value>> {
    normalize_list(value)
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(obj) => Some(obj),
            _ => None,
        })
        .collect()
}

/// Shapes each object element of a list; anything that is not a list yields nothing.
fn objects<T>(value: &Value, shape: impl Fn(&Map<String, Value>) -> T) -> Vec<T> {
    match value {
        Value::Array(items) => items.iter().filter_map(Value::as_object).map(shape).collect(),
        _ => Vec::new(),
    }
}

fn sub_text(item: &Map<String, Value>, key: &str) -> Option<String> {
    item.get(key).and_then(clean_value)
}
