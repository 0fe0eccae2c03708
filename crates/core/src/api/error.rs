use thiserror::Error;

use crate::filter::FilterError;
use crate::storage::StoreError;

/// Terminal failures a handler can report.
///
/// Budget exhaustion is deliberately absent: running out of execution time
/// mid-delete is a successful partial response carrying `Retry=true`, not
/// an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Bad request shape: missing table, missing id, unsupported operation.
    /// No store call is attempted.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The store accepted a batch but applied only part of it. Retrying the
    /// unprocessed operations is not supported.
    #[error("DynamoDB returned unprocessed items. This means the requests exceeded the read/write capacity of your database configuration. Please try lower the amount of data you're trying to process or increase your Read/Write capacity.")]
    UnprocessedItems,
    /// The store response lacked its consumed-capacity accounting, which is
    /// the only per-batch item count available.
    #[error("DynamoDB didn't return a count of records deleted. Please try again.")]
    AccountingMissing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_is_the_raw_message() {
        let error = HandlerError::Validation("Item is missing an Id property.".to_string());
        assert_eq!(error.to_string(), "Item is missing an Id property.");
    }

    #[test]
    fn filter_errors_pass_through() {
        let error = HandlerError::from(FilterError::BetweenUnsupported);
        assert!(error.to_string().contains("BETWEEN"));
    }

    #[test]
    fn store_errors_pass_through() {
        let error = HandlerError::from(StoreError::CallFailed("timeout".to_string()));
        assert_eq!(error.to_string(), "Store call failed: timeout");
    }

    #[test]
    fn unprocessed_items_display_explains_the_capacity_limit() {
        assert!(HandlerError::UnprocessedItems
            .to_string()
            .contains("unprocessed items"));
    }

    #[test]
    fn accounting_missing_display_tells_the_caller_to_retry() {
        assert!(HandlerError::AccountingMissing
            .to_string()
            .contains("Please try again"));
    }
}
