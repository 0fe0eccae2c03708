//! Read planning: point lookup, indexed query or full scan.
//!
//! A single `id = value` equality filter is the only shape the primary key
//! can answer directly, so it is routed as a key-condition query instead of
//! a full scan. Everything else scans, with the compiled filters installed
//! as a filter expression.

use crate::filter::{compile, FilterClause, FilterError};
use crate::storage::{QueryParams, ScanParams};

/// The store operation a read request resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadPlan {
    Scan(ScanParams),
    Query(QueryParams),
}

/// Plans a read for `table` from the (possibly empty) filter list.
///
/// `limit` must already be resolved against the configured default; the
/// `cursor` is the caller's resume token from a previous page.
pub fn plan_read(
    table: &str,
    filters: &[FilterClause],
    limit: u32,
    cursor: Option<&str>,
) -> Result<ReadPlan, FilterError> {
    let mut scan = ScanParams::new(table);
    scan.limit = Some(limit);
    scan.exclusive_start_id = cursor.map(str::to_string);

    if filters.is_empty() {
        return Ok(ReadPlan::Scan(scan));
    }

    let compiled = compile(filters)?;

    if filters.len() == 1 && filters[0].is_id_equality() {
        return Ok(ReadPlan::Query(QueryParams {
            table: table.to_string(),
            limit: scan.limit,
            exclusive_start_id: scan.exclusive_start_id,
            key_condition_expression: compiled.expression,
            attribute_values: compiled.attribute_values.unwrap_or_default(),
        }));
    }

    // Existence-only filters compile with no values; leave the map out
    // rather than sending an empty one.
    scan.filter_expression = Some(compiled.expression);
    scan.attribute_values = compiled.attribute_values;
    Ok(ReadPlan::Scan(scan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOp;
    use crate::item::AttrValue;

    #[test]
    fn no_filters_plans_a_bare_scan() {
        let plan = plan_read("people", &[], 1000, None).unwrap();
        match plan {
            ReadPlan::Scan(params) => {
                assert_eq!(params.table, "people");
                assert_eq!(params.limit, Some(1000));
                assert!(params.filter_expression.is_none());
                assert!(params.attribute_values.is_none());
            }
            ReadPlan::Query(_) => panic!("expected a scan"),
        }
    }

    #[test]
    fn id_equality_plans_a_point_query() {
        let filters = [FilterClause::new("id", FilterOp::Eq).with_value("123")];
        let plan = plan_read("people", &filters, 1000, None).unwrap();
        match plan {
            ReadPlan::Query(params) => {
                assert_eq!(params.key_condition_expression, "id = :v1");
                assert_eq!(params.attribute_values[":v1"], AttrValue::S("123".into()));
            }
            ReadPlan::Scan(_) => panic!("expected a query"),
        }
    }

    #[test]
    fn id_inequality_still_scans() {
        let filters = [FilterClause::new("id", FilterOp::Gt).with_value("123")];
        let plan = plan_read("people", &filters, 1000, None).unwrap();
        assert!(matches!(plan, ReadPlan::Scan(_)));
    }

    #[test]
    fn multiple_filters_scan_with_a_filter_expression() {
        let filters = [
            FilterClause::new("age", FilterOp::Ge).with_value(21),
            FilterClause::new("name", FilterOp::BeginsWith).with_value("Te"),
        ];
        let plan = plan_read("people", &filters, 50, None).unwrap();
        match plan {
            ReadPlan::Scan(params) => {
                assert_eq!(
                    params.filter_expression.as_deref(),
                    Some("age >= :v1 AND begins_with (name, :v2)")
                );
                assert_eq!(params.attribute_values.unwrap().len(), 2);
            }
            ReadPlan::Query(_) => panic!("expected a scan"),
        }
    }

    #[test]
    fn existence_only_filters_omit_the_value_map() {
        let filters = [FilterClause::new("email", FilterOp::Exists)];
        let plan = plan_read("people", &filters, 1000, None).unwrap();
        match plan {
            ReadPlan::Scan(params) => {
                assert_eq!(
                    params.filter_expression.as_deref(),
                    Some("attribute_exists (email)")
                );
                assert!(params.attribute_values.is_none());
            }
            ReadPlan::Query(_) => panic!("expected a scan"),
        }
    }

    #[test]
    fn cursor_becomes_the_exclusive_start_id() {
        let plan = plan_read("people", &[], 1000, Some("abc")).unwrap();
        match plan {
            ReadPlan::Scan(params) => {
                assert_eq!(params.exclusive_start_id.as_deref(), Some("abc"));
            }
            ReadPlan::Query(_) => panic!("expected a scan"),
        }
    }

    #[test]
    fn between_fails_before_any_store_call() {
        let filters = [FilterClause::new("age", FilterOp::Between).with_value(10)];
        let err = plan_read("people", &filters, 1000, None).unwrap_err();
        assert_eq!(err, FilterError::BetweenUnsupported);
    }
}
