//! Compiles an ordered filter list into one store expression.
//!
//! The output is a boolean expression string plus the placeholder-to-value
//! map the store resolves it against. Placeholders are `:v1`, `:v2`, ...
//! allocated densely across the value-bearing clauses only; unary clauses
//! consume no placeholder, wherever they sit in the list.

use std::collections::HashMap;

use super::{FilterClause, FilterError, FilterOp};
use crate::item::AttrValue;

/// A compiled filter expression, built once per request.
///
/// `attribute_values` is `None` when no clause carried a comparison value
/// (existence-style filters only).
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    pub expression: String,
    pub attribute_values: Option<HashMap<String, AttrValue>>,
}

/// Compiles the filter list. Fails on `BETWEEN`, which the store only
/// supports in key conditions (callers are told to split it into `>` and
/// `<` clauses instead), and on a comparison clause with no value to
/// compare against.
pub fn compile(filters: &[FilterClause]) -> Result<CompiledExpression, FilterError> {
    let mut values: HashMap<String, AttrValue> = HashMap::new();
    let mut rendered: Vec<String> = Vec::with_capacity(filters.len());

    for clause in filters {
        if clause.operation == FilterOp::Between {
            return Err(FilterError::BetweenUnsupported);
        }

        let placeholder = clause.compare_value.as_ref().map(|value| {
            let token = format!(":v{}", values.len() + 1);
            // Native numbers go out as the store's numeric type, everything
            // else as a string.
            let typed = if value.is_number() {
                AttrValue::N(value.raw())
            } else {
                AttrValue::S(value.raw())
            };
            values.insert(token.clone(), typed);
            token
        });

        let op = clause.operation;
        let text = if op.is_comparison() {
            // A comparison without a value would render as malformed
            // expression text, so it is rejected here.
            let token = placeholder
                .as_deref()
                .ok_or_else(|| FilterError::MissingCompareValue(clause.attribute.clone()))?;
            format!("{} {} {}", clause.attribute, op.store_spelling(), token)
        } else if let Some(token) = &placeholder {
            format!("{} ({}, {})", op.store_spelling(), clause.attribute, token)
        } else {
            format!("{} ({})", op.store_spelling(), clause.attribute)
        };
        rendered.push(text);
    }

    Ok(CompiledExpression {
        expression: rendered.join(" AND "),
        attribute_values: if values.is_empty() { None } else { Some(values) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_equality_renders_with_one_placeholder() {
        let compiled = compile(&[FilterClause::new("id", FilterOp::Eq).with_value("123")]).unwrap();

        assert_eq!(compiled.expression, "id = :v1");
        let values = compiled.attribute_values.unwrap();
        assert_eq!(values[":v1"], AttrValue::S("123".into()));
    }

    #[test]
    fn clauses_are_joined_with_and_in_input_order() {
        let compiled = compile(&[
            FilterClause::new("age", FilterOp::Ge).with_value(21),
            FilterClause::new("name", FilterOp::BeginsWith).with_value("Te"),
            FilterClause::new("email", FilterOp::NotNull),
        ])
        .unwrap();

        assert_eq!(
            compiled.expression,
            "age >= :v1 AND begins_with (name, :v2) AND attribute_exists (email)"
        );
    }

    #[test]
    fn clause_count_matches_filter_count() {
        let filters = vec![
            FilterClause::new("a", FilterOp::Eq).with_value("1"),
            FilterClause::new("b", FilterOp::Exists),
            FilterClause::new("c", FilterOp::Lt).with_value(5),
            FilterClause::new("d", FilterOp::Null),
        ];
        let compiled = compile(&filters).unwrap();
        assert_eq!(compiled.expression.split(" AND ").count(), filters.len());
    }

    #[test]
    fn placeholders_stay_dense_across_interspersed_unary_clauses() {
        let compiled = compile(&[
            FilterClause::new("a", FilterOp::Eq).with_value("1"),
            FilterClause::new("b", FilterOp::NotExists),
            FilterClause::new("c", FilterOp::Gt).with_value(2),
            FilterClause::new("d", FilterOp::Exists),
            FilterClause::new("e", FilterOp::Ne).with_value("3"),
        ])
        .unwrap();

        assert_eq!(
            compiled.expression,
            "a = :v1 AND attribute_not_exists (b) AND c > :v2 AND attribute_exists (d) AND e <> :v3"
        );
        assert_eq!(compiled.attribute_values.unwrap().len(), 3);
    }

    #[test]
    fn native_numbers_compile_to_the_numeric_type() {
        let compiled = compile(&[
            FilterClause::new("age", FilterOp::Eq).with_value(12),
            FilterClause::new("zip", FilterOp::Eq).with_value("90210"),
        ])
        .unwrap();

        let values = compiled.attribute_values.unwrap();
        assert_eq!(values[":v1"], AttrValue::N("12".into()));
        // String-typed digits stay a string; lexical classification only
        // applies to items, not filter values.
        assert_eq!(values[":v2"], AttrValue::S("90210".into()));
    }

    #[test]
    fn null_spellings_collapse_to_existence_functions() {
        let compiled = compile(&[
            FilterClause::new("a", FilterOp::Null),
            FilterClause::new("b", FilterOp::NotNull),
        ])
        .unwrap();

        assert_eq!(
            compiled.expression,
            "attribute_not_exists (a) AND attribute_exists (b)"
        );
        assert!(compiled.attribute_values.is_none());
    }

    #[test]
    fn valueless_comparison_is_rejected() {
        let err = compile(&[FilterClause::new("age", FilterOp::Ge)]).unwrap_err();
        assert_eq!(err, FilterError::MissingCompareValue("age".to_string()));

        // Unary operations stay valid without a value.
        assert!(compile(&[FilterClause::new("age", FilterOp::Exists)]).is_ok());
    }

    #[test]
    fn between_is_rejected() {
        let err = compile(&[
            FilterClause::new("age", FilterOp::Between).with_value(10),
        ])
        .unwrap_err();
        assert_eq!(err, FilterError::BetweenUnsupported);
    }

    #[test]
    fn between_is_rejected_even_after_valid_clauses() {
        let err = compile(&[
            FilterClause::new("a", FilterOp::Eq).with_value("1"),
            FilterClause::new("age", FilterOp::Between).with_value(10),
        ])
        .unwrap_err();
        assert_eq!(err, FilterError::BetweenUnsupported);
    }

    #[test]
    fn empty_filter_list_compiles_to_nothing() {
        let compiled = compile(&[]).unwrap();
        assert_eq!(compiled.expression, "");
        assert!(compiled.attribute_values.is_none());
    }
}
