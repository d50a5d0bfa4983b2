// ABOUTME: Untyped field mapping shared between the extractors and the record builder.
// ABOUTME: Provides the precedence merge where primary values win and secondary fills gaps.

use serde_json::{Map, Value};

/// Intermediate key/value result produced by one extractor.
pub type FieldMap = Map<String, Value>;

/// Merges two field mappings, preferring non-null values from `primary`.
///
/// A key from `secondary` is copied only when it is absent from `primary`
/// or null there. Non-null primary values are never overwritten.
pub fn merge(primary: &FieldMap, secondary: &FieldMap) -> FieldMap {
    let mut result = primary.clone();
    for (key, value) in secondary {
        let missing = result.get(key).map_or(true, Value::is_null);
        if missing {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}
