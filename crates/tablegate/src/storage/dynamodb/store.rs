//! DynamoDB `TableStore` implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeValue, DeleteRequest, PutRequest, ReturnConsumedCapacity, ReturnValue, WriteRequest,
};
use aws_sdk_dynamodb::Client;

use tablegate_core::item::AttrMap;
use tablegate_core::storage::{
    BatchWriteOutcome, Page, QueryParams, Result, ScanParams, StoreError, TableStore,
};

use super::conversions::{from_sdk_map, last_evaluated_id, start_key, to_sdk_map};
use super::error::{
    map_batch_write_error, map_delete_item_error, map_put_item_error, map_query_error,
    map_scan_error,
};

/// DynamoDB-backed store.
///
/// Holds the shared SDK client; every call receives its table name from the
/// request, so one store serves all tables.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a store over an already-configured DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a store from the SDK's default credential/region chain, with
    /// an optional region override.
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn scan(&self, params: &ScanParams) -> Result<Page> {
        let output = self
            .client
            .scan()
            .table_name(&params.table)
            .set_limit(params.limit.map(|l| l as i32))
            .set_exclusive_start_key(params.exclusive_start_id.as_deref().map(start_key))
            .set_filter_expression(params.filter_expression.clone())
            .set_expression_attribute_values(
                params.attribute_values.as_ref().map(|v| to_sdk_map(v)),
            )
            .set_projection_expression(params.projection.clone())
            .send()
            .await
            .map_err(|e| map_scan_error(e, &params.table))?;

        Ok(Page {
            items: output.items().iter().map(from_sdk_map).collect(),
            last_evaluated_id: last_evaluated_id(output.last_evaluated_key()),
        })
    }

    async fn query(&self, params: &QueryParams) -> Result<Page> {
        let output = self
            .client
            .query()
            .table_name(&params.table)
            .set_limit(params.limit.map(|l| l as i32))
            .set_exclusive_start_key(params.exclusive_start_id.as_deref().map(start_key))
            .key_condition_expression(&params.key_condition_expression)
            .set_expression_attribute_values(Some(to_sdk_map(&params.attribute_values)))
            .send()
            .await
            .map_err(|e| map_query_error(e, &params.table))?;

        Ok(Page {
            items: output.items().iter().map(from_sdk_map).collect(),
            last_evaluated_id: last_evaluated_id(output.last_evaluated_key()),
        })
    }

    async fn put_item(&self, table: &str, item: AttrMap) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(to_sdk_map(&item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table))?;

        Ok(())
    }

    async fn batch_put(&self, table: &str, items: &[AttrMap]) -> Result<BatchWriteOutcome> {
        let mut requests = Vec::with_capacity(items.len());
        for item in items {
            let put = PutRequest::builder()
                .set_item(Some(to_sdk_map(item)))
                .build()
                .map_err(|e| StoreError::InvalidItem(e.to_string()))?;
            requests.push(WriteRequest::builder().put_request(put).build());
        }

        let output = self
            .client
            .batch_write_item()
            .request_items(table, requests)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(|e| map_batch_write_error(e, table))?;

        Ok(BatchWriteOutcome {
            consumed_units: output
                .consumed_capacity()
                .first()
                .and_then(|c| c.capacity_units()),
            unprocessed_count: output
                .unprocessed_items()
                .map(|m| m.values().map(Vec::len).sum())
                .unwrap_or(0),
        })
    }

    async fn batch_delete(&self, table: &str, ids: &[String]) -> Result<BatchWriteOutcome> {
        let mut requests = Vec::with_capacity(ids.len());
        for id in ids {
            let delete = DeleteRequest::builder()
                .key("id", AttributeValue::S(id.clone()))
                .build()
                .map_err(|e| StoreError::InvalidItem(e.to_string()))?;
            requests.push(WriteRequest::builder().delete_request(delete).build());
        }

        let output = self
            .client
            .batch_write_item()
            .request_items(table, requests)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(|e| map_batch_write_error(e, table))?;

        Ok(BatchWriteOutcome {
            consumed_units: output
                .consumed_capacity()
                .first()
                .and_then(|c| c.capacity_units()),
            unprocessed_count: output
                .unprocessed_items()
                .map(|m| m.values().map(Vec::len).sum())
                .unwrap_or(0),
        })
    }

    async fn delete_item(&self, table: &str, id: &str) -> Result<Option<AttrMap>> {
        let output = self
            .client
            .delete_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table))?;

        Ok(output.attributes().map(from_sdk_map))
    }
}
