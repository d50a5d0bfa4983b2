// ABOUTME: Value normalization helpers shared by the extractors and the record builder.
// ABOUTME: Whitespace cleaning, currency amounts, safe numeric parsing and list coercion.

//! Normalization helpers.
//!
//! Every helper here is total: malformed input degrades to `None` or an
//! empty list and is reported at debug level, never as an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Amount with an optional leading or trailing currency marker.
static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<pre>[A-Z]{3}|[$€£])?\s*(?P<amount>[0-9][0-9,]*(?:\.[0-9]+)?)(?:\s*(?P<post>[A-Z]{3}\b|[$€£]))?",
    )
    .unwrap()
});

/// Trims and collapses whitespace runs into single spaces.
///
/// Returns `None` when nothing but whitespace remains.
pub fn clean_text(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Cleans a mapping value as text. Numbers are rendered; other shapes yield `None`.
pub fn clean_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => clean_text(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Maps a currency symbol to its ISO code, passing codes through.
fn currency_code(marker: &str) -> String {
    match marker {
        "$" => "USD".to_string(),
        "€" => "EUR".to_string(),
        "£" => "GBP".to_string(),
        other => other.to_string(),
    }
}

/// Extracts a numeric amount and currency from text such as `$5,000,000` or `5,000,000 EUR`.
///
/// A marker before the amount takes precedence over one after it.
pub fn extract_currency_amount(raw: &str) -> (Option<f64>, Option<String>) {
    if raw.is_empty() {
        return (None, None);
    }
    let caps = match CURRENCY_RE.captures(raw) {
        Some(c) => c,
        None => return (None, None),
    };

    let amount_str = caps["amount"].replace(',', "");
    let amount = match amount_str.parse::<f64>() {
        Ok(a) => Some(a),
        Err(_) => {
            debug!(raw, "failed to parse currency amount");
            None
        }
    };

    let currency = caps
        .name("pre")
        .or_else(|| caps.name("post"))
        .map(|m| currency_code(m.as_str()));

    (amount, currency)
}

/// Parses an integer, stripping thousands separators and surrounding whitespace.
pub fn parse_int_safe(raw: &Value) -> Option<i64> {
    match raw {
        Value::Null => None,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
                _ => {
                    debug!(%n, "failed to parse int");
                    None
                }
            }
        }
        Value::String(s) => match s.replace(',', "").trim().parse::<i64>() {
            Ok(i) => Some(i),
            Err(_) => {
                debug!(raw = %s, "failed to parse int");
                None
            }
        },
        other => {
            debug!(raw = %other, "failed to parse int");
            None
        }
    }
}

/// Parses a float, stripping thousands separators and surrounding whitespace.
///
/// Non-finite results are rejected.
pub fn parse_float_safe(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_finite() => Some(f),
        _ => {
            debug!(raw = %raw, "failed to parse float");
            None
        }
    }
}

/// Coerces a value into a list: null becomes empty, a scalar or object a single element.
pub fn normalize_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

/// Null, false, zero and empty strings or containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_text_collapses_runs() {
        assert_eq!(clean_text("  Acme \n\t Corp  "), Some("Acme Corp".to_string()));
        assert_eq!(clean_text("   "), None);
        assert_eq!(clean_text(""), None);
    }

    #[test]
    fn clean_text_is_idempotent() {
        for s in ["a  b", " x\u{00a0}y ", "\n\nz\n", "plain"] {
            let once = clean_text(s);
            let twice = once.as_deref().and_then(clean_text);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn clean_value_handles_numbers_and_objects() {
        assert_eq!(clean_value(&json!(" hi ")), Some("hi".to_string()));
        assert_eq!(clean_value(&json!(42)), Some("42".to_string()));
        assert_eq!(clean_value(&json!({"a": 1})), None);
        assert_eq!(clean_value(&Value::Null), None);
    }

    #[test]
    fn currency_symbol_prefix() {
        assert_eq!(
            extract_currency_amount("$5,000,000"),
            (Some(5_000_000.0), Some("USD".to_string()))
        );
        assert_eq!(
            extract_currency_amount("£12.5"),
            (Some(12.5), Some("GBP".to_string()))
        );
    }

    #[test]
    fn currency_code_suffix() {
        assert_eq!(
            extract_currency_amount("5,000,000 EUR"),
            (Some(5_000_000.0), Some("EUR".to_string()))
        );
        assert_eq!(
            extract_currency_amount("USD 250"),
            (Some(250.0), Some("USD".to_string()))
        );
    }

    #[test]
    fn currency_without_marker() {
        assert_eq!(extract_currency_amount("about 300"), (Some(300.0), None));
        // "EURO" is not a three-letter code followed by a word boundary
        assert_eq!(extract_currency_amount("7 EURO"), (Some(7.0), None));
    }

    #[test]
    fn currency_unparsable() {
        assert_eq!(extract_currency_amount("n/a"), (None, None));
        assert_eq!(extract_currency_amount(""), (None, None));
        assert_eq!(extract_currency_amount(", ,"), (None, None));
    }

    #[test]
    fn parse_int_safe_cases() {
        assert_eq!(parse_int_safe(&json!("1,234")), Some(1234));
        assert_eq!(parse_int_safe(&json!("  77 ")), Some(77));
        assert_eq!(parse_int_safe(&json!(50)), Some(50));
        assert_eq!(parse_int_safe(&json!(50.0)), Some(50));
        assert_eq!(parse_int_safe(&json!(0)), Some(0));
        assert_eq!(parse_int_safe(&Value::Null), None);
        assert_eq!(parse_int_safe(&json!("abc")), None);
        assert_eq!(parse_int_safe(&json!(2.5)), None);
        assert_eq!(parse_int_safe(&json!([1])), None);
    }

    #[test]
    fn parse_float_safe_cases() {
        assert_eq!(parse_float_safe(&json!("4.5")), Some(4.5));
        assert_eq!(parse_float_safe(&json!("1,000.25")), Some(1000.25));
        assert_eq!(parse_float_safe(&json!(3)), Some(3.0));
        assert_eq!(parse_float_safe(&json!("NaN")), None);
        assert_eq!(parse_float_safe(&json!("x")), None);
        assert_eq!(parse_float_safe(&Value::Null), None);
    }

    #[test]
    fn normalize_list_cases() {
        assert!(normalize_list(&Value::Null).is_empty());
        assert_eq!(normalize_list(&json!("x")), vec![json!("x")]);
        assert_eq!(normalize_list(&json!(["a", "b"])), vec![json!("a"), json!("b")]);
        assert_eq!(normalize_list(&json!({"k": 1})), vec![json!({"k": 1})]);
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!("a")));
        assert!(is_truthy(&json!(1.5)));
    }
}
