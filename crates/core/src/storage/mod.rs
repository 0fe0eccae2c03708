//! The store abstraction the backends implement.

mod error;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use traits::TableStore;
pub use types::{BatchWriteOutcome, Page, QueryParams, ScanParams, STORE_BATCH_CEILING};
