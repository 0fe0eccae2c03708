use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A scalar value as it arrives in a JSON event: a string or a number.
///
/// Numbers keep their `serde_json` representation so `12`, `12.5` and
/// `0.5` all survive the trip into the store's decimal-string format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Returns the value's string form, the same text the store stores.
    pub fn raw(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Returns true if the value is a native JSON number.
    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

/// A typed store value: string or number, tagged the way the wire tags it.
///
/// Exactly one tag by construction. The store's number representation is a
/// decimal string, so both variants carry `String`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    S(String),
    N(String),
}

impl AttrValue {
    /// The raw value with the type tag stripped.
    pub fn raw(&self) -> &str {
        match self {
            AttrValue::S(s) | AttrValue::N(s) => s,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AttrValue::N(_))
    }
}

/// A plain item as supplied by the caller: attribute name to scalar value.
pub type PlainItem = HashMap<String, Scalar>;

/// An item in the store's tagged representation.
pub type AttrMap = HashMap<String, AttrValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_deserializes_strings_and_numbers() {
        let s: Scalar = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(s, Scalar::Text("hello".to_string()));

        let n: Scalar = serde_json::from_str("12.5").unwrap();
        assert!(n.is_number());
        assert_eq!(n.raw(), "12.5");
    }

    #[test]
    fn attr_value_raw_strips_the_tag() {
        assert_eq!(AttrValue::S("abc".into()).raw(), "abc");
        assert_eq!(AttrValue::N("42".into()).raw(), "42");
    }
}
