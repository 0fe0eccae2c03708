//! Conversions between plain items and the store's tagged representation.
//!
//! Pure functions, testable without any store access. Classification is
//! lexical: a value whose string form looks like a decimal number is stored
//! as a number, everything else as a string. The `id` attribute is the
//! store's key and cursor, so it is always stored as a string no matter
//! what it contains.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{AttrMap, AttrValue, PlainItem};

/// Unsigned decimal numbers only: `12`, `12.5`, `.5`. No sign, no exponent.
static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((\d+(\.\d+)?)|((\d+)?\.\d+))$").unwrap());

/// Returns true if `value` matches the decimal-number pattern the store
/// accepts for its numeric type.
pub fn is_numeric(value: &str) -> bool {
    NUMERIC.is_match(value)
}

/// Converts a plain item into the store's tagged representation.
///
/// There is no error path: anything that fails the numeric pattern is
/// silently treated as a string.
pub fn to_attr_map(item: &PlainItem) -> AttrMap {
    item.iter()
        .map(|(name, value)| {
            let raw = value.raw();
            let attr = if name != "id" && is_numeric(&raw) {
                AttrValue::N(raw)
            } else {
                AttrValue::S(raw)
            };
            (name.clone(), attr)
        })
        .collect()
}

/// Flattens one tagged item back into a plain attribute-to-text map.
pub fn from_attr_map(item: &AttrMap) -> HashMap<String, String> {
    item.iter()
        .map(|(name, value)| (name.clone(), value.raw().to_string()))
        .collect()
}

/// Flattens a page of tagged items back into plain attribute-to-text maps.
pub fn from_attr_maps(items: &[AttrMap]) -> Vec<HashMap<String, String>> {
    items.iter().map(from_attr_map).collect()
}
