use thiserror::Error;

/// Errors surfaced by a store backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Throughput exceeded, please retry: {0}")]
    Throttled(String),
    #[error("Store call failed: {0}")]
    CallFailed(String),
    #[error("Invalid item: {0}")]
    InvalidItem(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_not_found_display() {
        let error = StoreError::TableNotFound("people".to_string());
        assert_eq!(error.to_string(), "Table not found: people");
    }

    #[test]
    fn call_failed_display() {
        let error = StoreError::CallFailed("connection reset".to_string());
        assert_eq!(error.to_string(), "Store call failed: connection reset");
    }

    #[test]
    fn invalid_item_display() {
        let error = StoreError::InvalidItem("missing key".to_string());
        assert_eq!(error.to_string(), "Invalid item: missing key");
    }
}
