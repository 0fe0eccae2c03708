use async_trait::async_trait;

use crate::item::AttrMap;

use super::{BatchWriteOutcome, Page, QueryParams, Result, ScanParams};

/// The key-value item store the handlers run against.
///
/// Every item carries a unique `id` string attribute that doubles as the
/// store's cursor token. Batch operations report capacity accounting and
/// an unprocessed-operation count; the callers treat both as load-bearing.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Scans a table, honoring limit, resume token, filter expression and
    /// projection.
    async fn scan(&self, params: &ScanParams) -> Result<Page>;

    /// Runs a key-condition query against the primary key.
    async fn query(&self, params: &QueryParams) -> Result<Page>;

    /// Writes a single item.
    async fn put_item(&self, table: &str, item: AttrMap) -> Result<()>;

    /// Writes one batch of items. The caller is responsible for staying
    /// under [`super::STORE_BATCH_CEILING`].
    async fn batch_put(&self, table: &str, items: &[AttrMap]) -> Result<BatchWriteOutcome>;

    /// Deletes one batch of items keyed by `id`.
    async fn batch_delete(&self, table: &str, ids: &[String]) -> Result<BatchWriteOutcome>;

    /// Deletes a single item by `id`, returning the old item if one was
    /// deleted.
    async fn delete_item(&self, table: &str, id: &str) -> Result<Option<AttrMap>>;
}
