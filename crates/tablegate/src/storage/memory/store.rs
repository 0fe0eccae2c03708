//! In-memory `TableStore` implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;

use tablegate_core::item::AttrMap;
use tablegate_core::storage::{
    BatchWriteOutcome, Page, QueryParams, Result, ScanParams, StoreError, TableStore,
};

use super::eval;

/// Failure injection for the paths the handlers must survive.
#[derive(Debug, Default)]
struct Faults {
    /// 1-based batch-write call number that fails with a call error.
    fail_batch_write_call: Option<usize>,
    /// Report no consumed-capacity accounting on batch writes.
    omit_capacity_units: bool,
    /// Report one unprocessed operation on every batch write.
    report_unprocessed: bool,
    /// Return a mismatched `id` from single-item deletes.
    corrupt_delete_return: bool,
}

/// Call log for assertions on chunking and ordering.
#[derive(Debug, Default)]
struct CallLog {
    batch_write_calls: usize,
    batch_put_sizes: Vec<usize>,
    batch_delete_ids: Vec<Vec<String>>,
}

/// In-memory storage backend for testing.
///
/// Tables are `BTreeMap`s keyed by `id`, so scan order is deterministic.
/// Data is not persisted and is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, BTreeMap<String, AttrMap>>>>,
    faults: Arc<Mutex<Faults>>,
    log: Arc<Mutex<CallLog>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a table directly, bypassing the call log.
    pub async fn seed(&self, table: &str, items: impl IntoIterator<Item = AttrMap>) {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        for item in items {
            let id = item
                .get("id")
                .map(|v| v.raw().to_string())
                .expect("seeded items must carry an id");
            rows.insert(id, item);
        }
    }

    /// Number of items currently in `table`.
    pub async fn table_len(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    /// Make the `n`th batch-write call (1-based, puts and deletes counted
    /// together) fail with a call error.
    pub fn fail_batch_write_call(&self, n: usize) {
        self.faults.lock().unwrap().fail_batch_write_call = Some(n);
    }

    /// Drop consumed-capacity accounting from batch-write responses.
    pub fn omit_capacity_units(&self) {
        self.faults.lock().unwrap().omit_capacity_units = true;
    }

    /// Report one unprocessed operation on every batch write.
    pub fn report_unprocessed(&self) {
        self.faults.lock().unwrap().report_unprocessed = true;
    }

    /// Return a mismatched `id` from single-item deletes.
    pub fn corrupt_delete_return(&self) {
        self.faults.lock().unwrap().corrupt_delete_return = true;
    }

    /// Sizes of the batch-put calls seen so far.
    pub fn batch_put_sizes(&self) -> Vec<usize> {
        self.log.lock().unwrap().batch_put_sizes.clone()
    }

    /// The id batches handed to `batch_delete`, in call order.
    pub fn batch_delete_ids(&self) -> Vec<Vec<String>> {
        self.log.lock().unwrap().batch_delete_ids.clone()
    }

    /// Checks the shared batch-write fault and call counter. Returns the
    /// outcome template for a successful call.
    fn admit_batch_write(&self, operations: usize) -> Result<BatchWriteOutcome> {
        let faults = self.faults.lock().unwrap();
        let call_number = {
            let mut log = self.log.lock().unwrap();
            log.batch_write_calls += 1;
            log.batch_write_calls
        };
        if faults.fail_batch_write_call == Some(call_number) {
            return Err(StoreError::CallFailed(format!(
                "injected failure on batch write call {call_number}"
            )));
        }
        Ok(BatchWriteOutcome {
            consumed_units: if faults.omit_capacity_units {
                None
            } else {
                Some(operations as f64)
            },
            unprocessed_count: usize::from(faults.report_unprocessed),
        })
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn scan(&self, params: &ScanParams) -> Result<Page> {
        let tables = self.tables.read().await;
        let rows = tables.get(&params.table).cloned().unwrap_or_default();
        drop(tables);

        let start = params.exclusive_start_id.as_deref();
        let mut matched = rows
            .into_iter()
            .filter(|(id, _)| start.is_none_or(|s| id.as_str() > s))
            .filter(|(_, item)| match &params.filter_expression {
                Some(expression) => {
                    eval::matches(expression, params.attribute_values.as_ref(), item)
                }
                None => true,
            })
            .map(|(_, item)| item)
            .collect::<Vec<_>>();

        let limit = params.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let mut last_evaluated_id = None;
        if matched.len() > limit {
            matched.truncate(limit);
            last_evaluated_id = matched
                .last()
                .and_then(|item| item.get("id"))
                .map(|v| v.raw().to_string());
        }

        let items = match &params.projection {
            Some(projection) => {
                let keep: Vec<&str> = projection.split(',').map(str::trim).collect();
                matched
                    .into_iter()
                    .map(|item| {
                        item.into_iter()
                            .filter(|(name, _)| keep.contains(&name.as_str()))
                            .collect()
                    })
                    .collect()
            }
            None => matched,
        };

        Ok(Page {
            items,
            last_evaluated_id,
        })
    }

    async fn query(&self, params: &QueryParams) -> Result<Page> {
        // Only the point-lookup shape the planner emits is supported.
        let mut parts = params.key_condition_expression.split_whitespace();
        let (Some("id"), Some("="), Some(token), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(StoreError::CallFailed(format!(
                "unsupported key condition: {}",
                params.key_condition_expression
            )));
        };
        let Some(key) = params.attribute_values.get(token) else {
            return Err(StoreError::CallFailed(format!(
                "unresolved placeholder: {token}"
            )));
        };

        let tables = self.tables.read().await;
        let item = tables
            .get(&params.table)
            .and_then(|rows| rows.get(key.raw()))
            .cloned();

        Ok(Page {
            items: item.into_iter().collect(),
            last_evaluated_id: None,
        })
    }

    async fn put_item(&self, table: &str, item: AttrMap) -> Result<()> {
        let id = item
            .get("id")
            .map(|v| v.raw().to_string())
            .ok_or_else(|| StoreError::InvalidItem("item has no id attribute".to_string()))?;
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().insert(id, item);
        Ok(())
    }

    async fn batch_put(&self, table: &str, items: &[AttrMap]) -> Result<BatchWriteOutcome> {
        let outcome = self.admit_batch_write(items.len())?;
        self.log
            .lock()
            .unwrap()
            .batch_put_sizes
            .push(items.len());

        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        for item in items {
            let id = item
                .get("id")
                .map(|v| v.raw().to_string())
                .ok_or_else(|| StoreError::InvalidItem("item has no id attribute".to_string()))?;
            rows.insert(id, item.clone());
        }
        Ok(outcome)
    }

    async fn batch_delete(&self, table: &str, ids: &[String]) -> Result<BatchWriteOutcome> {
        let outcome = self.admit_batch_write(ids.len())?;
        self.log
            .lock()
            .unwrap()
            .batch_delete_ids
            .push(ids.to_vec());

        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            for id in ids {
                rows.remove(id);
            }
        }
        Ok(outcome)
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<Option<AttrMap>> {
        let mut tables = self.tables.write().await;
        let removed = tables.get_mut(table).and_then(|rows| rows.remove(id));
        drop(tables);

        if self.faults.lock().unwrap().corrupt_delete_return {
            return Ok(removed.map(|mut item| {
                item.insert(
                    "id".to_string(),
                    tablegate_core::item::AttrValue::S(format!("not-{id}")),
                );
                item
            }));
        }
        Ok(removed)
    }
}
