//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `tablegate_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use tablegate_core::storage::StoreError;

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table: &str,
) -> StoreError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => StoreError::TableNotFound(table.to_string()),
        ScanError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string())
        }
        ScanError::RequestLimitExceeded(e) => StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string()),
        err => StoreError::CallFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a Query SDK error to StoreError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table: &str,
) -> StoreError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => StoreError::TableNotFound(table.to_string()),
        QueryError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string())
        }
        QueryError::RequestLimitExceeded(e) => StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string()),
        err => StoreError::CallFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table: &str,
) -> StoreError {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => StoreError::TableNotFound(table.to_string()),
        PutItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string())
        }
        PutItemError::RequestLimitExceeded(e) => StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string()),
        err => StoreError::CallFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a BatchWriteItem SDK error to StoreError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
    table: &str,
) -> StoreError {
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(_) => {
            StoreError::TableNotFound(table.to_string())
        }
        BatchWriteItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string())
        }
        BatchWriteItemError::RequestLimitExceeded(e) => {
            StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string())
        }
        err => StoreError::CallFailed(format!("BatchWriteItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table: &str,
) -> StoreError {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            StoreError::TableNotFound(table.to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(e) => {
            StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string())
        }
        DeleteItemError::RequestLimitExceeded(e) => {
            StoreError::Throttled(e.message().unwrap_or("throughput exceeded").to_string())
        }
        err => StoreError::CallFailed(format!("DeleteItem failed: {:?}", err)),
    }
}
