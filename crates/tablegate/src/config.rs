use std::env;

use tablegate_core::storage::STORE_BATCH_CEILING;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// AWS region override; `None` defers to the SDK's default chain.
    pub region: Option<String>,
    /// Default page size for scans and queries (default: 1,000).
    pub page_limit: u32,
    /// Items per batch write. One slot below the store's 25-operation
    /// ceiling (default: 24).
    pub batch_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLEGATE_REGION` - AWS region override (default: SDK chain)
    /// - `TABLEGATE_PAGE_LIMIT` - default read page size (default: 1,000)
    /// - `TABLEGATE_BATCH_SIZE` - batch write size (1 to 24, default: 24)
    pub fn from_env() -> Self {
        Self {
            region: env::var("TABLEGATE_REGION").ok(),
            page_limit: env::var("TABLEGATE_PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_000),
            // Zero would make chunking panic and anything at or above the
            // store ceiling would be rejected per call; out-of-range values
            // fall back to the default.
            batch_size: env::var("TABLEGATE_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| (1..STORE_BATCH_CEILING).contains(&n))
                .unwrap_or(STORE_BATCH_CEILING - 1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: None,
            page_limit: 1_000,
            batch_size: STORE_BATCH_CEILING - 1,
        }
    }
}
