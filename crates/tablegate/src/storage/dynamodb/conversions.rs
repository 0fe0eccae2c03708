//! Conversions between the core value model and the SDK's attribute values.
//!
//! Pure functions, testable without DynamoDB access. Only the string and
//! number types cross this boundary; anything else coming back from the
//! store is skipped (flat string/number attributes are the supported
//! surface).

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use tablegate_core::item::{AttrMap, AttrValue};

/// Convert one core value to the SDK representation.
pub fn to_sdk_value(value: &AttrValue) -> AttributeValue {
    match value {
        AttrValue::S(s) => AttributeValue::S(s.clone()),
        AttrValue::N(n) => AttributeValue::N(n.clone()),
    }
}

/// Convert a tagged item (or a placeholder-value map) to the SDK shape.
pub fn to_sdk_map(map: &AttrMap) -> HashMap<String, AttributeValue> {
    map.iter()
        .map(|(name, value)| (name.clone(), to_sdk_value(value)))
        .collect()
}

/// Convert an SDK item back into the core value model.
pub fn from_sdk_map(item: &HashMap<String, AttributeValue>) -> AttrMap {
    item.iter()
        .filter_map(|(name, value)| {
            let converted = match value {
                AttributeValue::S(s) => Some(AttrValue::S(s.clone())),
                AttributeValue::N(n) => Some(AttrValue::N(n.clone())),
                other => {
                    tracing::debug!(attribute = %name, ?other, "skipping non-scalar attribute");
                    None
                }
            };
            converted.map(|v| (name.clone(), v))
        })
        .collect()
}

/// The `id`-keyed resume token in the shape `ExclusiveStartKey` expects.
pub fn start_key(id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
}

/// Reads the `id` out of a `LastEvaluatedKey` map, if one is present.
pub fn last_evaluated_id(key: Option<&HashMap<String, AttributeValue>>) -> Option<String> {
    key.and_then(|k| k.get("id"))
        .and_then(|v| v.as_s().ok())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values_round_trip() {
        let core: AttrMap = HashMap::from([
            ("id".to_string(), AttrValue::S("1".to_string())),
            ("age".to_string(), AttrValue::N("12".to_string())),
        ]);
        let back = from_sdk_map(&to_sdk_map(&core));
        assert_eq!(back, core);
    }

    #[test]
    fn non_scalar_attributes_are_skipped() {
        let item = HashMap::from([
            ("id".to_string(), AttributeValue::S("1".to_string())),
            ("flag".to_string(), AttributeValue::Bool(true)),
        ]);
        let converted = from_sdk_map(&item);
        assert_eq!(converted.len(), 1);
        assert!(converted.contains_key("id"));
    }

    #[test]
    fn start_key_is_a_string_id_entry() {
        let key = start_key("abc");
        assert_eq!(key["id"].as_s().unwrap(), "abc");
    }

    #[test]
    fn last_evaluated_id_reads_the_cursor() {
        assert_eq!(last_evaluated_id(None), None);
        let key = start_key("abc");
        assert_eq!(last_evaluated_id(Some(&key)), Some("abc".to_string()));
    }
}
