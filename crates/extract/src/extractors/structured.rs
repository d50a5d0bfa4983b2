// ABOUTME: JSON-LD organization extractor for company pages.
// ABOUTME: Selects the last Organization/Corporation descriptor and maps it into field keys.

//! Structured-data extraction.
//!
//! Scans every `<script type="application/ld+json">` block. A block may hold
//! one descriptor, a list of descriptors, or an object with an `@graph` list.
//! Among qualifying organization descriptors the last one encountered wins.

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::{debug, warn, Span};

use crate::fields::FieldMap;
use crate::normalize::{clean_text, clean_value, extract_currency_amount, normalize_list, parse_int_safe};

/// Schema types accepted as an organization descriptor.
const ORGANIZATION_TYPES: &[&str] = &["Organization", "Corporation"];

/// Address sub-fields joined into `headquarters`, in output order.
const ADDRESS_PARTS: &[&str] = &[
    "streetAddress",
    "addressLocality",
    "addressRegion",
    "postalCode",
    "addressCountry",
];

/// Extracts a field mapping from embedded JSON-LD organization data.
#[derive(Debug, Clone)]
pub struct StructuredExtractor {
    span: Span,
}

impl Default for StructuredExtractor {
    fn default() -> Self {
        Self::new(tracing::debug_span!("structured_extractor"))
    }
}

impl StructuredExtractor {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Finds the winning organization descriptor, if any.
    ///
    /// Blocks that fail to parse are logged and skipped.
    pub fn find_descriptor(&self, doc: &Html) -> Option<Map<String, Value>> {
        let _entered = self.span.enter();
        let selector = Selector::parse("script[type='application/ld+json']").ok()?;

        let mut best: Option<Map<String, Value>> = None;
        for (index, script) in doc.select(&selector).enumerate() {
            let text = script.text().collect::<String>();
            let value = match serde_json::from_str::<Value>(&text) {
                Ok(v) => v,
                Err(e) => {
                    warn!(block = index, error = %e, "skipping malformed JSON-LD block");
                    continue;
                }
            };

            for candidate in candidates(&value) {
                if candidate.get("@type").map_or(false, is_organization_type) {
                    best = Some(candidate.clone());
                }
            }
        }

        if best.is_none() {
            debug!("no organization descriptor found");
        }
        best
    }

    /// Maps a descriptor into internal field keys.
    pub fn map_descriptor(&self, data: &Map<String, Value>) -> FieldMap {
        let _entered = self.span.enter();
        let mut result = FieldMap::new();
        if data.is_empty() {
            return result;
        }

        result.insert("name".into(), get(data, "name"));
        result.insert("description".into(), get(data, "description"));
        result.insert("website".into(), website(data));

        if let Some(address) = address_object(data.get("address")) {
            let joined = ADDRESS_PARTS
                .iter()
                .filter_map(|key| address.get(*key).and_then(address_part))
                .collect::<Vec<_>>()
                .join(", ");
            result.insert("headquarters".into(), opt_string(clean_text(&joined)));
        }

        result.insert("phone_number".into(), get(data, "telephone"));
        result.insert("industry".into(), Value::Array(normalize_list(&get(data, "industry"))));

        let social_media = normalize_list(&get(data, "sameAs"))
            .into_iter()
            .filter(Value::is_string)
            .collect();
        result.insert("social_media".into(), Value::Array(social_media));

        let employees = [data.get("numberOfEmployees"), data.get("employees")]
            .into_iter()
            .flatten()
            .find(|v| !v.is_null())
            .and_then(employee_count);
        result.insert("employees".into(), employees.map_or(Value::Null, Value::from));

        if let Some(ticker) = data.get("tickerSymbol") {
            result.insert("stock_symbol".into(), ticker.clone());
        }

        let leadership = leadership_entries(data);
        if !leadership.is_empty() {
            result.insert("leadership".into(), Value::Array(leadership));
        }

        apply_additional_properties(data, &mut result);

        result
    }

    /// Convenience: descriptor lookup followed by mapping.
    pub fn extract(&self, doc: &Html) -> FieldMap {
        self.find_descriptor(doc)
            .map(|d| self.map_descriptor(&d))
            .unwrap_or_default()
    }
}

/// Descriptor candidates of one parsed block, in scan order.
fn candidates(value: &Value) -> Vec<&Map<String, Value>> {
    let mut out = Vec::new();
    let items: Vec<&Value> = match value {
        Value::Array(arr) => arr.iter().collect(),
        other => vec![other],
    };
    for item in items {
        if let Some(obj) = item.as_object() {
            out.push(obj);
            if let Some(Value::Array(graph)) = obj.get("@graph") {
                out.extend(graph.iter().filter_map(Value::as_object));
            }
        }
    }
    out
}

fn is_organization_type(value: &Value) -> bool {
    match value {
        Value::String(s) => ORGANIZATION_TYPES.contains(&s.as_str()),
        Value::Array(arr) => arr.iter().any(is_organization_type),
        _ => false,
    }
}

fn get(data: &Map<String, Value>, key: &str) -> Value {
    data.get(key).cloned().unwrap_or(Value::Null)
}

fn opt_string(s: Option<String>) -> Value {
    s.map_or(Value::Null, Value::String)
}

/// `url`, falling back to the first string in `sameAs`. Blank strings count as absent.
fn website(data: &Map<String, Value>) -> Value {
    if let Some(url) = data.get("url").filter(|v| is_present(v)) {
        return url.clone();
    }
    normalize_list(&get(data, "sameAs"))
        .into_iter()
        .find(|v| v.is_string() && is_present(v))
        .unwrap_or(Value::Null)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn address_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    match value? {
        Value::Object(obj) => Some(obj),
        Value::Array(arr) => arr.iter().find_map(Value::as_object),
        _ => None,
    }
}

/// Address sub-field text; nested objects such as `Country` contribute their `name`.
fn address_part(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => obj.get("name").and_then(clean_value),
        other => clean_value(other),
    }
}

/// Employee count from a plain value or a `QuantitativeValue`.
fn employee_count(value: &Value) -> Option<i64> {
    match value {
        Value::Object(obj) => obj.get("value").and_then(parse_int_safe),
        other => parse_int_safe(other),
    }
}

/// Founder and employee Person entries as leadership objects.
fn leadership_entries(data: &Map<String, Value>) -> Vec<Value> {
    ["founder", "employee"]
        .iter()
        .flat_map(|key| normalize_list(&get(data, key)))
        .filter_map(|person| {
            let person = person.as_object()?;
            let mut entry = Map::new();
            entry.insert("name".into(), get(person, "name"));
            entry.insert("title".into(), get(person, "jobTitle"));
            entry.insert("url".into(), get(person, "url"));
            Some(Value::Object(entry))
        })
        .collect()
}

/// Revenue and funding from `additionalProperty` name/value pairs; the last match wins.
fn apply_additional_properties(data: &Map<String, Value>, result: &mut FieldMap) {
    let props = match data.get("additionalProperty") {
        Some(Value::Array(props)) => props,
        _ => return,
    };

    for prop in props.iter().filter_map(Value::as_object) {
        let name = match prop.get("name").and_then(clean_value) {
            Some(n) => n.to_lowercase(),
            None => continue,
        };
        let raw = match prop.get("value") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        if name.contains("revenue") {
            let (amount, currency) = extract_currency_amount(&raw);
            result.insert("revenue".into(), amount.map_or(Value::Null, Value::from));
            result.insert("revenue_currency".into(), opt_string(currency));
        }
        if name.contains("funding") {
            let (amount, currency) = extract_currency_amount(&raw);
            result.insert("total_funding_amount".into(), amount.map_or(Value::Null, Value::from));
            result.insert("funding_currency".into(), opt_string(currency));
        }
    }
}
