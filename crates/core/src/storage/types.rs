use std::collections::HashMap;

use crate::item::{AttrMap, AttrValue};

/// The store refuses batch writes above this many operations.
pub const STORE_BATCH_CEILING: usize = 25;

/// Parameters for a table scan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanParams {
    pub table: String,
    pub limit: Option<u32>,
    /// Resume token: scan starts after the item with this `id`.
    pub exclusive_start_id: Option<String>,
    pub filter_expression: Option<String>,
    pub attribute_values: Option<HashMap<String, AttrValue>>,
    /// Attributes to return; `None` returns the whole item.
    pub projection: Option<String>,
}

impl ScanParams {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }
}

/// Parameters for a key-condition query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub table: String,
    pub limit: Option<u32>,
    pub exclusive_start_id: Option<String>,
    pub key_condition_expression: String,
    pub attribute_values: HashMap<String, AttrValue>,
}

/// One page of scan/query results.
///
/// `last_evaluated_id` present means there is more to read; absent means
/// the scan or query is exhausted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub items: Vec<AttrMap>,
    pub last_evaluated_id: Option<String>,
}

/// What the store reports back for one batch write.
///
/// `consumed_units` is the store's capacity accounting, the only item
/// count it returns. `unprocessed_count` is the number of operations the
/// store accepted but did not apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchWriteOutcome {
    pub consumed_units: Option<f64>,
    pub unprocessed_count: usize,
}

impl BatchWriteOutcome {
    /// A fully-applied batch of `n` operations.
    pub fn applied(n: usize) -> Self {
        Self {
            consumed_units: Some(n as f64),
            unprocessed_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_params_default_to_a_bare_scan() {
        let params = ScanParams::new("people");
        assert_eq!(params.table, "people");
        assert!(params.limit.is_none());
        assert!(params.filter_expression.is_none());
        assert!(params.projection.is_none());
    }

    #[test]
    fn applied_outcome_accounts_for_every_operation() {
        let outcome = BatchWriteOutcome::applied(24);
        assert_eq!(outcome.consumed_units, Some(24.0));
        assert_eq!(outcome.unprocessed_count, 0);
    }
}
