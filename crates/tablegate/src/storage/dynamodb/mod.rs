//! DynamoDB storage backend.
//!
//! Implements [`tablegate_core::storage::TableStore`] on top of
//! `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;
