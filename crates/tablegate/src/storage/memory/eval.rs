//! Naive filter-expression evaluation.
//!
//! Understands exactly the clause shapes the compiler renders: comparisons
//! (`attr op :vN`), `begins_with (attr, :vN)` and the two existence
//! functions, joined with `" AND "`. Anything else evaluates to false.

use std::collections::HashMap;

use tablegate_core::item::{AttrMap, AttrValue};

/// Evaluates a compiled expression against one item.
pub fn matches(
    expression: &str,
    values: Option<&HashMap<String, AttrValue>>,
    item: &AttrMap,
) -> bool {
    if expression.is_empty() {
        return true;
    }
    expression
        .split(" AND ")
        .all(|clause| clause_matches(clause, values, item))
}

fn clause_matches(
    clause: &str,
    values: Option<&HashMap<String, AttrValue>>,
    item: &AttrMap,
) -> bool {
    if let Some(inner) = function_args(clause, "attribute_exists") {
        return item.contains_key(inner.trim());
    }
    if let Some(inner) = function_args(clause, "attribute_not_exists") {
        return !item.contains_key(inner.trim());
    }
    if let Some(inner) = function_args(clause, "begins_with") {
        let Some((attribute, token)) = inner.split_once(',') else {
            return false;
        };
        let Some(expected) = resolve(values, token.trim()) else {
            return false;
        };
        return item
            .get(attribute.trim())
            .is_some_and(|v| v.raw().starts_with(expected.raw()));
    }

    let mut parts = clause.split_whitespace();
    let (Some(attribute), Some(op), Some(token), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Some(expected) = resolve(values, token) else {
        return false;
    };
    let Some(actual) = item.get(attribute) else {
        return false;
    };
    compare(actual, op, expected)
}

/// Returns the text between the parens of `name (...)`, if the clause is
/// that function call.
fn function_args<'a>(clause: &'a str, name: &str) -> Option<&'a str> {
    clause
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn resolve<'a>(
    values: Option<&'a HashMap<String, AttrValue>>,
    token: &str,
) -> Option<&'a AttrValue> {
    values?.get(token)
}

fn compare(actual: &AttrValue, op: &str, expected: &AttrValue) -> bool {
    // Numeric comparison only when both sides are the numeric type;
    // otherwise the raw strings are compared, which is what the store does
    // for mismatched types too.
    if actual.is_numeric() && expected.is_numeric() {
        let (Ok(a), Ok(b)) = (actual.raw().parse::<f64>(), expected.raw().parse::<f64>()) else {
            return false;
        };
        match op {
            "=" => a == b,
            "<>" => a != b,
            "<=" => a <= b,
            "<" => a < b,
            ">=" => a >= b,
            ">" => a > b,
            _ => false,
        }
    } else {
        let (a, b) = (actual.raw(), expected.raw());
        match op {
            "=" => a == b,
            "<>" => a != b,
            "<=" => a <= b,
            "<" => a < b,
            ">=" => a >= b,
            ">" => a > b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablegate_core::filter::{compile, FilterClause, FilterOp};
    use tablegate_core::item::{to_attr_map, PlainItem, Scalar};

    fn item(entries: &[(&str, Scalar)]) -> AttrMap {
        let plain: PlainItem = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        to_attr_map(&plain)
    }

    fn eval(filters: &[FilterClause], item: &AttrMap) -> bool {
        let compiled = compile(filters).unwrap();
        matches(
            &compiled.expression,
            compiled.attribute_values.as_ref(),
            item,
        )
    }

    #[test]
    fn equality_matches_on_raw_value() {
        let item = item(&[("id", "1".into()), ("name", "Teddy".into())]);
        assert!(eval(
            &[FilterClause::new("name", FilterOp::Eq).with_value("Teddy")],
            &item
        ));
        assert!(!eval(
            &[FilterClause::new("name", FilterOp::Eq).with_value("Bob")],
            &item
        ));
    }

    #[test]
    fn numeric_comparison_is_numeric_not_lexicographic() {
        let item = item(&[("age", 9.into())]);
        // "9" > "12" lexicographically; 9 < 12 numerically.
        assert!(eval(
            &[FilterClause::new("age", FilterOp::Lt).with_value(12)],
            &item
        ));
    }

    #[test]
    fn begins_with_and_existence_clauses() {
        let item = item(&[("id", "1".into()), ("name", "Teddy".into())]);
        assert!(eval(
            &[FilterClause::new("name", FilterOp::BeginsWith).with_value("Te")],
            &item
        ));
        assert!(eval(&[FilterClause::new("email", FilterOp::Null)], &item));
        assert!(eval(&[FilterClause::new("name", FilterOp::Exists)], &item));
        assert!(!eval(&[FilterClause::new("email", FilterOp::NotNull)], &item));
    }

    #[test]
    fn all_clauses_must_match() {
        let item = item(&[("age", 30.into()), ("name", "Teddy".into())]);
        assert!(eval(
            &[
                FilterClause::new("age", FilterOp::Ge).with_value(21),
                FilterClause::new("name", FilterOp::BeginsWith).with_value("Te"),
            ],
            &item
        ));
        assert!(!eval(
            &[
                FilterClause::new("age", FilterOp::Ge).with_value(21),
                FilterClause::new("name", FilterOp::BeginsWith).with_value("Bo"),
            ],
            &item
        ));
    }

    #[test]
    fn empty_expression_matches_everything() {
        assert!(matches("", None, &item(&[("id", "1".into())])));
    }
}
